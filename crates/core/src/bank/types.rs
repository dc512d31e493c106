//! Bank ledger domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::BankEntryId;

/// Bank ledger entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BankEntryKind {
    /// Money into the account.
    Deposit,
    /// Money out of the account.
    Withdrawal,
}

impl BankEntryKind {
    /// Signed effect of an entry of this kind on the account balance.
    #[must_use]
    pub fn balance_delta(self, amount: Decimal) -> Decimal {
        match self {
            Self::Deposit => amount,
            Self::Withdrawal => -amount,
        }
    }
}

/// A bank ledger entry as seen by the engine.
#[derive(Debug, Clone)]
pub struct BankEntryView {
    /// Entry identity.
    pub id: BankEntryId,
    /// Deposit or withdrawal.
    pub kind: BankEntryKind,
    /// Amount (positive).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Store insertion sequence; with the date, fixes replay order.
    pub seq: u64,
}

/// One row of a statement-style display: the entry plus the balance after it.
#[derive(Debug, Clone)]
pub struct LedgerRow {
    /// The underlying entry.
    pub entry: BankEntryView,
    /// Account balance after applying this entry.
    pub balance: Decimal,
}
