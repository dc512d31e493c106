//! Customer/supplier records and their ledger entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_core::party::PartyEntryKind;
use stockbook_shared::types::{LedgerEntryId, PartyId};

/// Which side of the business a party sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    /// Buys from us; a positive balance is a receivable.
    Customer,
    /// Sells to us; a positive balance is a payable.
    Supplier,
}

/// A customer or supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    /// Party identity.
    pub id: PartyId,
    /// Customer or supplier.
    pub kind: PartyKind,
    /// Display name.
    pub name: String,
    /// Contact phone.
    pub phone: String,
    /// Free-text address.
    pub address: String,
    /// Inactive parties are hidden from new transactions.
    pub is_active: bool,
    /// Display cache of the derived balance. Recomputed after every ledger
    /// write; the entry log is the authority.
    pub current_balance: Decimal,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One entry on a party's transaction log. Append-only except through the
/// upsert-by-reference path, which edits in place so re-saving an order does
/// not double-post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyLedgerEntry {
    /// Entry identity.
    pub id: LedgerEntryId,
    /// The party this entry belongs to.
    pub party: PartyId,
    /// Transaction type; fixes the sign of the balance effect.
    pub kind: PartyEntryKind,
    /// Stored amount (positive except for adjustments).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Upsert key together with (party, kind); e.g. a sales order number.
    pub reference: Option<String>,
    /// Description shown on statements.
    pub description: String,
    /// Store insertion sequence; display tie-breaker within a date.
    pub seq: u64,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
