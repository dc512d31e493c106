//! Loan position math and status reconciliation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{
    LoanEntryKind, LoanEntryView, LoanPosition, LoanStatus, PortfolioSummary, ReconcileOutcome,
    StatusProjection,
};

/// Loan ledger engine.
pub struct LoanLedgerService;

impl LoanLedgerService {
    /// Sum of disbursement entries. Falls back to the principal amount when
    /// the sum is not positive: loans created before the disbursement-entry
    /// pattern existed have no entries, and the principal is still owed.
    /// This special case is load-bearing for existing data; do not "fix" it.
    #[must_use]
    pub fn total_disbursed(principal_amount: Decimal, entries: &[LoanEntryView]) -> Decimal {
        let total: Decimal = entries
            .iter()
            .filter(|entry| entry.kind == LoanEntryKind::Disbursement)
            .map(|entry| entry.amount)
            .sum();
        if total > Decimal::ZERO {
            total
        } else {
            principal_amount
        }
    }

    /// Sum of payment entries.
    #[must_use]
    pub fn total_paid(entries: &[LoanEntryView]) -> Decimal {
        entries
            .iter()
            .filter(|entry| entry.kind == LoanEntryKind::Payment)
            .map(|entry| entry.amount)
            .sum()
    }

    /// Full derived position of a loan.
    #[must_use]
    pub fn position(principal_amount: Decimal, entries: &[LoanEntryView]) -> LoanPosition {
        let total_disbursed = Self::total_disbursed(principal_amount, entries);
        let total_paid = Self::total_paid(entries);

        LoanPosition {
            total_disbursed,
            total_paid,
            principal_paid: total_paid.min(total_disbursed),
            interest_overpaid: (total_paid - total_disbursed).max(Decimal::ZERO),
            outstanding_principal: (total_disbursed - total_paid).max(Decimal::ZERO),
        }
    }

    /// Reconciles the cached status projection against the derived
    /// outstanding principal.
    ///
    /// State machine: active -> closed when outstanding reaches zero
    /// (closed date set to `today` unless already present); closed -> active
    /// when outstanding rises above zero again (closed date cleared).
    #[must_use]
    pub fn reconcile(
        current: StatusProjection,
        outstanding_principal: Decimal,
        today: NaiveDate,
    ) -> (ReconcileOutcome, StatusProjection) {
        if outstanding_principal <= Decimal::ZERO && current.status != LoanStatus::Closed {
            let projection = StatusProjection {
                status: LoanStatus::Closed,
                closed_date: Some(current.closed_date.unwrap_or(today)),
            };
            (ReconcileOutcome::Closed, projection)
        } else if outstanding_principal > Decimal::ZERO && current.status == LoanStatus::Closed {
            let projection = StatusProjection {
                status: LoanStatus::Active,
                closed_date: None,
            };
            (ReconcileOutcome::Reopened, projection)
        } else {
            (ReconcileOutcome::Unchanged, current)
        }
    }

    /// Rolls active-loan positions up into portfolio totals.
    #[must_use]
    pub fn portfolio(loans: &[(LoanStatus, LoanPosition)]) -> PortfolioSummary {
        loans
            .iter()
            .filter(|(status, _)| *status == LoanStatus::Active)
            .fold(PortfolioSummary::default(), |mut summary, (_, position)| {
                summary.active_count += 1;
                summary.total_active_disbursed += position.total_disbursed;
                summary.total_active_outstanding += position.outstanding_principal;
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, day).unwrap()
    }

    fn entry(kind: LoanEntryKind, amount: Decimal, day: u32) -> LoanEntryView {
        LoanEntryView {
            kind,
            amount,
            transaction_date: date(day),
        }
    }

    #[test]
    fn test_principal_fallback_without_disbursements() {
        // Loan created with principal 10000 and no ledger entries.
        let position = LoanLedgerService::position(dec!(10000), &[]);
        assert_eq!(position.total_disbursed, dec!(10000));
        assert_eq!(position.total_paid, Decimal::ZERO);
        assert_eq!(position.outstanding_principal, dec!(10000));
        assert_eq!(position.interest_overpaid, Decimal::ZERO);
    }

    #[test]
    fn test_disbursement_entries_override_principal() {
        let entries = vec![
            entry(LoanEntryKind::Disbursement, dec!(4000), 1),
            entry(LoanEntryKind::Disbursement, dec!(2500), 5),
        ];
        assert_eq!(
            LoanLedgerService::total_disbursed(dec!(10000), &entries),
            dec!(6500)
        );
    }

    #[test]
    fn test_payments_close_out_principal() {
        // Payments of 4000 then 6000 against a 10000 principal.
        let entries = vec![
            entry(LoanEntryKind::Payment, dec!(4000), 2),
            entry(LoanEntryKind::Payment, dec!(6000), 3),
        ];
        let position = LoanLedgerService::position(dec!(10000), &entries);

        assert_eq!(position.total_paid, dec!(10000));
        assert_eq!(position.outstanding_principal, Decimal::ZERO);
        assert_eq!(position.interest_overpaid, Decimal::ZERO);
        assert_eq!(position.principal_paid, dec!(10000));
    }

    #[test]
    fn test_overpayment_becomes_interest() {
        // A further 500 after full repayment.
        let entries = vec![
            entry(LoanEntryKind::Payment, dec!(4000), 2),
            entry(LoanEntryKind::Payment, dec!(6000), 3),
            entry(LoanEntryKind::Payment, dec!(500), 4),
        ];
        let position = LoanLedgerService::position(dec!(10000), &entries);

        assert_eq!(position.total_paid, dec!(10500));
        assert_eq!(position.outstanding_principal, Decimal::ZERO);
        assert_eq!(position.interest_overpaid, dec!(500));
        assert_eq!(position.principal_paid, dec!(10000));
    }

    #[test]
    fn test_reconcile_closes_at_zero_outstanding() {
        let current = StatusProjection {
            status: LoanStatus::Active,
            closed_date: None,
        };
        let (outcome, projection) =
            LoanLedgerService::reconcile(current, Decimal::ZERO, date(10));

        assert_eq!(outcome, ReconcileOutcome::Closed);
        assert_eq!(projection.status, LoanStatus::Closed);
        assert_eq!(projection.closed_date, Some(date(10)));
    }

    #[test]
    fn test_reconcile_keeps_existing_closed_date() {
        let current = StatusProjection {
            status: LoanStatus::Active,
            closed_date: Some(date(3)),
        };
        let (_, projection) = LoanLedgerService::reconcile(current, Decimal::ZERO, date(10));
        assert_eq!(projection.closed_date, Some(date(3)));
    }

    #[test]
    fn test_reconcile_reopens_on_new_outstanding() {
        let current = StatusProjection {
            status: LoanStatus::Closed,
            closed_date: Some(date(3)),
        };
        let (outcome, projection) = LoanLedgerService::reconcile(current, dec!(2000), date(10));

        assert_eq!(outcome, ReconcileOutcome::Reopened);
        assert_eq!(projection.status, LoanStatus::Active);
        assert_eq!(projection.closed_date, None);
    }

    #[test]
    fn test_reconcile_unchanged_is_idempotent() {
        let closed = StatusProjection {
            status: LoanStatus::Closed,
            closed_date: Some(date(3)),
        };
        let (outcome, projection) = LoanLedgerService::reconcile(closed, Decimal::ZERO, date(10));
        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert_eq!(projection, closed);

        let active = StatusProjection {
            status: LoanStatus::Active,
            closed_date: None,
        };
        let (outcome, projection) = LoanLedgerService::reconcile(active, dec!(100), date(10));
        assert_eq!(outcome, ReconcileOutcome::Unchanged);
        assert_eq!(projection, active);
    }

    #[test]
    fn test_portfolio_counts_active_only() {
        let active = LoanLedgerService::position(dec!(5000), &[]);
        let closed = LoanLedgerService::position(
            dec!(3000),
            &[entry(LoanEntryKind::Payment, dec!(3000), 1)],
        );
        let summary = LoanLedgerService::portfolio(&[
            (LoanStatus::Active, active),
            (LoanStatus::Closed, closed),
        ]);

        assert_eq!(summary.active_count, 1);
        assert_eq!(summary.total_active_disbursed, dec!(5000));
        assert_eq!(summary.total_active_outstanding, dec!(5000));
    }

    // ========================================================================
    // Properties: loan balance algebra and status consistency
    // ========================================================================

    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (0i64..1_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    fn entry_strategy() -> impl Strategy<Value = LoanEntryView> {
        (any::<bool>(), amount_strategy(), 1u32..=28).prop_map(|(is_payment, amount, day)| {
            entry(
                if is_payment {
                    LoanEntryKind::Payment
                } else {
                    LoanEntryKind::Disbursement
                },
                amount,
                day,
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// outstanding + paid - interest_overpaid == disbursed, for every
        /// state reachable by posting entries in any order.
        #[test]
        fn prop_loan_balance_algebra(
            principal in (1i64..1_000_000).prop_map(|n| Decimal::new(n, 2)),
            entries in prop::collection::vec(entry_strategy(), 0..20),
        ) {
            let position = LoanLedgerService::position(principal, &entries);

            prop_assert_eq!(
                position.outstanding_principal + position.total_paid - position.interest_overpaid,
                position.total_disbursed
            );
            prop_assert!(position.outstanding_principal >= Decimal::ZERO);
            prop_assert!(position.interest_overpaid >= Decimal::ZERO);
            // At most one of outstanding/overpaid is nonzero.
            prop_assert!(
                position.outstanding_principal.is_zero() || position.interest_overpaid.is_zero()
            );
        }

        /// After reconcile, status == closed iff outstanding == 0, and a
        /// closed loan always has a closed date.
        #[test]
        fn prop_status_matches_outstanding(
            principal in (1i64..1_000_000).prop_map(|n| Decimal::new(n, 2)),
            entries in prop::collection::vec(entry_strategy(), 0..20),
            started_closed in any::<bool>(),
        ) {
            let position = LoanLedgerService::position(principal, &entries);
            let current = StatusProjection {
                status: if started_closed { LoanStatus::Closed } else { LoanStatus::Active },
                closed_date: started_closed.then(|| date(1)),
            };

            let (_, projection) =
                LoanLedgerService::reconcile(current, position.outstanding_principal, date(15));

            prop_assert_eq!(
                projection.status == LoanStatus::Closed,
                position.outstanding_principal.is_zero()
            );
            if projection.status == LoanStatus::Closed {
                prop_assert!(projection.closed_date.is_some());
            } else {
                prop_assert!(projection.closed_date.is_none());
            }
        }
    }
}
