//! Credit-card-loan records and their ledger entries.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_core::loan::{LoanEntryKind, LoanStatus};
use stockbook_shared::types::{BankAccountId, LoanEntryId, LoanId};

/// A credit card loan deal.
///
/// `status` and `closed_date` are cached projections of the derived
/// outstanding principal; the loan repository reconciles them after every
/// ledger write.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Loan identity.
    pub id: LoanId,
    /// Human-facing deal number, unique.
    pub deal_number: String,
    /// The lending institution.
    pub lender_name: String,
    /// Principal amount; the disbursed-total fallback for loans with no
    /// disbursement entries.
    pub principal_amount: Decimal,
    /// Annual interest rate in percent, informational only.
    pub interest_rate: Decimal,
    /// Disbursement start date.
    pub start_date: NaiveDate,
    /// Bank account the card draws on, when tracked.
    pub bank_account: Option<BankAccountId>,
    /// Cached lifecycle status.
    pub status: LoanStatus,
    /// Date the loan closed, set when outstanding first reaches zero and
    /// cleared if the loan reopens.
    pub closed_date: Option<NaiveDate>,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One entry on a loan's transaction log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanLedgerEntry {
    /// Entry identity.
    pub id: LoanEntryId,
    /// The loan this entry belongs to.
    pub loan: LoanId,
    /// Disbursement or payment.
    pub kind: LoanEntryKind,
    /// Amount (positive).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Description shown on the loan ledger.
    pub description: String,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
