//! Balance and statement derivation for party ledgers.

use rust_decimal::Decimal;

use super::error::PartyLedgerError;
use super::types::{PartyEntryKind, PartyEntryView, StatementLine, StatementTotals};

/// Party ledger engine.
///
/// Pure derivations over a party's entry log. Appending and the
/// upsert-by-reference mutation live at the store boundary; this service
/// supplies the sign rules and validation they apply.
pub struct PartyLedgerService;

impl PartyLedgerService {
    /// Authoritative current balance: the sum of signed entry effects.
    #[must_use]
    pub fn current_balance(entries: &[PartyEntryView]) -> Decimal {
        entries
            .iter()
            .map(|entry| entry.kind.balance_delta(entry.amount))
            .sum()
    }

    /// Validates an amount for a given kind. Negative magnitudes are
    /// rejected for every kind except adjustments.
    pub fn validate_amount(kind: PartyEntryKind, amount: Decimal) -> Result<(), PartyLedgerError> {
        if amount < Decimal::ZERO && !kind.is_sign_carrying() {
            return Err(PartyLedgerError::NegativeAmount { kind });
        }
        Ok(())
    }

    /// Splits an entry into debit/credit columns for statement display,
    /// consistent with the sign table: a positive balance effect is a debit,
    /// a negative one a credit.
    #[must_use]
    pub fn debit_credit(kind: PartyEntryKind, amount: Decimal) -> (Decimal, Decimal) {
        let delta = kind.balance_delta(amount);
        if delta >= Decimal::ZERO {
            (delta, Decimal::ZERO)
        } else {
            (Decimal::ZERO, delta.abs())
        }
    }

    /// Builds the statement-style display: entries replayed in ascending
    /// (date, seq) order to accumulate the running balance, then reversed so
    /// the newest entry is first.
    #[must_use]
    pub fn statement(entries: &[PartyEntryView]) -> Vec<StatementLine> {
        let mut ordered: Vec<PartyEntryView> = entries.to_vec();
        ordered.sort_by_key(|entry| (entry.transaction_date, entry.seq));

        let mut balance = Decimal::ZERO;
        let mut lines: Vec<StatementLine> = ordered
            .into_iter()
            .map(|entry| {
                let (debit, credit) = Self::debit_credit(entry.kind, entry.amount);
                balance += debit - credit;
                StatementLine {
                    entry,
                    debit,
                    credit,
                    balance,
                }
            })
            .collect();

        lines.reverse();
        lines
    }

    /// Footer totals for a statement.
    #[must_use]
    pub fn statement_totals(lines: &[StatementLine]) -> StatementTotals {
        let total_debit: Decimal = lines.iter().map(|line| line.debit).sum();
        let total_credit: Decimal = lines.iter().map(|line| line.credit).sum();
        let opening_balance = lines
            .iter()
            .find(|line| line.entry.kind == PartyEntryKind::OpeningBalance)
            .map_or(Decimal::ZERO, |line| line.debit - line.credit);

        StatementTotals {
            total_debit,
            total_credit,
            opening_balance,
            current_balance: total_debit - total_credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use stockbook_shared::types::LedgerEntryId;

    fn entry(
        kind: PartyEntryKind,
        amount: Decimal,
        day: u32,
        seq: u64,
    ) -> PartyEntryView {
        PartyEntryView {
            id: LedgerEntryId::new(),
            kind,
            amount,
            transaction_date: NaiveDate::from_ymd_opt(2026, 4, day).unwrap(),
            reference: None,
            description: String::new(),
            seq,
        }
    }

    #[test]
    fn test_current_balance_mixed_log() {
        let entries = vec![
            entry(PartyEntryKind::OpeningBalance, dec!(500), 1, 1),
            entry(PartyEntryKind::Sale, dec!(1200), 2, 2),
            entry(PartyEntryKind::Payment, dec!(700), 3, 3),
            entry(PartyEntryKind::Return, dec!(100), 4, 4),
            entry(PartyEntryKind::Adjustment, dec!(-50), 5, 5),
        ];

        // 500 + 1200 - 700 - 100 - 50
        assert_eq!(PartyLedgerService::current_balance(&entries), dec!(850));
    }

    #[test]
    fn test_validate_amount() {
        assert!(PartyLedgerService::validate_amount(PartyEntryKind::Sale, dec!(10)).is_ok());
        assert!(
            PartyLedgerService::validate_amount(PartyEntryKind::Adjustment, dec!(-10)).is_ok()
        );
        assert_eq!(
            PartyLedgerService::validate_amount(PartyEntryKind::Payment, dec!(-10)),
            Err(PartyLedgerError::NegativeAmount {
                kind: PartyEntryKind::Payment
            })
        );
    }

    #[test]
    fn test_debit_credit_split() {
        assert_eq!(
            PartyLedgerService::debit_credit(PartyEntryKind::Sale, dec!(100)),
            (dec!(100), Decimal::ZERO)
        );
        assert_eq!(
            PartyLedgerService::debit_credit(PartyEntryKind::Payment, dec!(60)),
            (Decimal::ZERO, dec!(60))
        );
        assert_eq!(
            PartyLedgerService::debit_credit(PartyEntryKind::Return, dec!(30)),
            (Decimal::ZERO, dec!(30))
        );
        // Negative opening balance shows in the credit column.
        assert_eq!(
            PartyLedgerService::debit_credit(PartyEntryKind::OpeningBalance, dec!(-200)),
            (Decimal::ZERO, dec!(200))
        );
        assert_eq!(
            PartyLedgerService::debit_credit(PartyEntryKind::Adjustment, dec!(-75)),
            (Decimal::ZERO, dec!(75))
        );
    }

    #[test]
    fn test_statement_newest_first_with_running_balance() {
        let entries = vec![
            entry(PartyEntryKind::Sale, dec!(1000), 2, 2),
            entry(PartyEntryKind::OpeningBalance, dec!(500), 1, 1),
            entry(PartyEntryKind::Payment, dec!(300), 3, 3),
        ];

        let lines = PartyLedgerService::statement(&entries);
        assert_eq!(lines.len(), 3);
        // Newest first for display.
        assert_eq!(lines[0].entry.kind, PartyEntryKind::Payment);
        assert_eq!(lines[0].balance, dec!(1200));
        assert_eq!(lines[1].entry.kind, PartyEntryKind::Sale);
        assert_eq!(lines[1].balance, dec!(1500));
        assert_eq!(lines[2].entry.kind, PartyEntryKind::OpeningBalance);
        assert_eq!(lines[2].balance, dec!(500));
    }

    #[test]
    fn test_statement_same_day_tie_breaks_by_seq() {
        let entries = vec![
            entry(PartyEntryKind::Payment, dec!(100), 1, 5),
            entry(PartyEntryKind::Sale, dec!(100), 1, 4),
        ];

        let lines = PartyLedgerService::statement(&entries);
        // Sale (seq 4) replays first, payment (seq 5) last; display reversed.
        assert_eq!(lines[0].entry.kind, PartyEntryKind::Payment);
        assert_eq!(lines[0].balance, Decimal::ZERO);
        assert_eq!(lines[1].entry.kind, PartyEntryKind::Sale);
        assert_eq!(lines[1].balance, dec!(100));
    }

    #[test]
    fn test_statement_totals() {
        let entries = vec![
            entry(PartyEntryKind::OpeningBalance, dec!(500), 1, 1),
            entry(PartyEntryKind::Sale, dec!(1000), 2, 2),
            entry(PartyEntryKind::Payment, dec!(300), 3, 3),
        ];
        let lines = PartyLedgerService::statement(&entries);
        let totals = PartyLedgerService::statement_totals(&lines);

        assert_eq!(totals.total_debit, dec!(1500));
        assert_eq!(totals.total_credit, dec!(300));
        assert_eq!(totals.opening_balance, dec!(500));
        assert_eq!(totals.current_balance, dec!(1200));
    }

    // ========================================================================
    // Properties
    // ========================================================================

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    fn kind_strategy() -> impl Strategy<Value = PartyEntryKind> {
        prop_oneof![
            Just(PartyEntryKind::Sale),
            Just(PartyEntryKind::Payment),
            Just(PartyEntryKind::OpeningBalance),
            Just(PartyEntryKind::Adjustment),
            Just(PartyEntryKind::Return),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// The statement's oldest-to-newest replay lands on the authoritative
        /// balance: display and truth never drift.
        #[test]
        fn prop_statement_replay_matches_balance(
            inputs in prop::collection::vec((kind_strategy(), amount_strategy(), 1u32..=28), 1..15),
        ) {
            let entries: Vec<PartyEntryView> = inputs
                .iter()
                .enumerate()
                .map(|(i, (kind, amount, day))| entry(*kind, *amount, *day, i as u64))
                .collect();

            let lines = PartyLedgerService::statement(&entries);
            let newest = lines.first().expect("non-empty");
            prop_assert_eq!(newest.balance, PartyLedgerService::current_balance(&entries));
        }

        /// Debit/credit splitting conserves the signed delta.
        #[test]
        fn prop_debit_credit_conserves_delta(
            kind in kind_strategy(),
            amount in (-1_000_000i64..1_000_000).prop_map(|n| Decimal::new(n, 2)),
        ) {
            let (debit, credit) = PartyLedgerService::debit_credit(kind, amount);
            prop_assert!(debit >= Decimal::ZERO);
            prop_assert!(credit >= Decimal::ZERO);
            prop_assert_eq!(debit - credit, kind.balance_delta(amount));
        }
    }
}
