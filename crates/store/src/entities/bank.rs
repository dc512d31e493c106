//! Bank account records and their ledger entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_core::bank::BankEntryKind;
use stockbook_shared::types::{BankAccountId, BankEntryId};

/// A company bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankAccount {
    /// Account identity.
    pub id: BankAccountId,
    /// Display name (bank plus branch, typically).
    pub name: String,
    /// Account number at the bank.
    pub account_number: String,
    /// Balance carried over from before the entry log began.
    pub opening_balance: Decimal,
    /// Display cache of the derived balance; the entry log plus
    /// `opening_balance` is the authority.
    pub current_balance: Decimal,
    /// Inactive accounts are hidden from new transactions.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One entry on a bank account's transaction log. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankLedgerEntry {
    /// Entry identity.
    pub id: BankEntryId,
    /// The account this entry belongs to.
    pub account: BankAccountId,
    /// Deposit or withdrawal.
    pub kind: BankEntryKind,
    /// Amount (positive).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Description shown on the account ledger.
    pub description: String,
    /// Store insertion sequence; with the date, fixes replay order.
    pub seq: u64,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
