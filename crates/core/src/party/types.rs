//! Party ledger domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::LedgerEntryId;

/// Transaction types on a customer/supplier ledger.
///
/// The sign of each type's effect on the balance is fixed here, as an
/// exhaustive match: a new type cannot silently default to "no effect".
/// Amounts are stored positive for every type except `Adjustment`, whose
/// stored amount carries its own sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartyEntryKind {
    /// A sale invoiced to the party; increases what they owe.
    Sale,
    /// A payment received from the party; decreases what they owe.
    Payment,
    /// Balance carried over from before the transaction history began.
    OpeningBalance,
    /// Manual correction; its stored amount may be negative.
    Adjustment,
    /// Goods returned by the party; decreases what they owe.
    Return,
}

impl PartyEntryKind {
    /// Signed effect of an entry of this kind on the party balance.
    #[must_use]
    pub fn balance_delta(self, amount: Decimal) -> Decimal {
        match self {
            Self::Sale | Self::OpeningBalance | Self::Adjustment => amount,
            Self::Payment | Self::Return => -amount,
        }
    }

    /// True for kinds whose stored amount carries its own sign.
    #[must_use]
    pub const fn is_sign_carrying(self) -> bool {
        matches!(self, Self::Adjustment)
    }

    /// Human label, matching statement displays.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sale => "Sale",
            Self::Payment => "Payment",
            Self::OpeningBalance => "Opening Balance",
            Self::Adjustment => "Adjustment",
            Self::Return => "Return",
        }
    }
}

/// A ledger entry as seen by the engine.
#[derive(Debug, Clone)]
pub struct PartyEntryView {
    /// Entry identity.
    pub id: LedgerEntryId,
    /// Transaction type.
    pub kind: PartyEntryKind,
    /// Stored amount (positive except for adjustments).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
    /// Free-text reference; the idempotent-upsert key together with
    /// (party, kind).
    pub reference: Option<String>,
    /// Description shown on statements.
    pub description: String,
    /// Store insertion sequence, display tie-breaker.
    pub seq: u64,
}

/// One row of a statement-style ledger display.
#[derive(Debug, Clone)]
pub struct StatementLine {
    /// The underlying entry.
    pub entry: PartyEntryView,
    /// Debit column (positive balance effect).
    pub debit: Decimal,
    /// Credit column (negative balance effect).
    pub credit: Decimal,
    /// Running balance after this entry, in chronological order.
    pub balance: Decimal,
}

/// Statement footer totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementTotals {
    /// Sum of the debit column.
    pub total_debit: Decimal,
    /// Sum of the credit column.
    pub total_credit: Decimal,
    /// Opening-balance contribution, if an opening entry exists.
    pub opening_balance: Decimal,
    /// Authoritative current balance (debits minus credits).
    pub current_balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(PartyEntryKind::Sale, dec!(100), dec!(100))]
    #[case(PartyEntryKind::OpeningBalance, dec!(100), dec!(100))]
    #[case(PartyEntryKind::Adjustment, dec!(100), dec!(100))]
    #[case(PartyEntryKind::Adjustment, dec!(-40), dec!(-40))]
    #[case(PartyEntryKind::Payment, dec!(100), dec!(-100))]
    #[case(PartyEntryKind::Return, dec!(25), dec!(-25))]
    fn test_sign_table(
        #[case] kind: PartyEntryKind,
        #[case] amount: Decimal,
        #[case] expected: Decimal,
    ) {
        assert_eq!(kind.balance_delta(amount), expected);
    }

    #[test]
    fn test_only_adjustment_is_sign_carrying() {
        assert!(PartyEntryKind::Adjustment.is_sign_carrying());
        assert!(!PartyEntryKind::Sale.is_sign_carrying());
        assert!(!PartyEntryKind::Payment.is_sign_carrying());
        assert!(!PartyEntryKind::OpeningBalance.is_sign_carrying());
        assert!(!PartyEntryKind::Return.is_sign_carrying());
    }
}
