//! Loan lifecycle through the repository: seeded disbursement, repayment to
//! close, interest on overpayment, and reopening.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::date;
use stockbook_core::loan::{LoanEntryKind, LoanStatus, ReconcileOutcome};
use stockbook_store::RecordStore;
use stockbook_store::repositories::{LoanError, LoanRepository, NewLoan};

fn new_loan(deal_number: &str, principal: Decimal) -> NewLoan {
    NewLoan {
        deal_number: deal_number.to_owned(),
        lender_name: "Habib Bank".to_owned(),
        principal_amount: principal,
        interest_rate: dec!(18),
        start_date: date(1, 1),
        bank_account: None,
    }
}

#[test]
fn new_loan_is_fully_outstanding_and_active() {
    let mut store = RecordStore::new();
    let loan = LoanRepository::create_loan(&mut store, new_loan("HBL-001", dec!(10000))).unwrap();

    let position = LoanRepository::position(&store, loan).unwrap();
    assert_eq!(position.total_disbursed, dec!(10000));
    assert_eq!(position.total_paid, Decimal::ZERO);
    assert_eq!(position.outstanding_principal, dec!(10000));

    let record = store.loan(loan).unwrap();
    assert_eq!(record.status, LoanStatus::Active);
    assert_eq!(record.closed_date, None);
}

#[test]
fn full_repayment_closes_the_loan_with_date() {
    let mut store = RecordStore::new();
    let loan = LoanRepository::create_loan(&mut store, new_loan("HBL-002", dec!(10000))).unwrap();

    let outcome = LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Payment,
        dec!(4000),
        date(2, 1),
        "Installment".to_owned(),
        date(2, 1),
    )
    .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Unchanged);

    let outcome = LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Payment,
        dec!(6000),
        date(3, 1),
        "Final installment".to_owned(),
        date(3, 1),
    )
    .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Closed);

    let record = store.loan(loan).unwrap();
    assert_eq!(record.status, LoanStatus::Closed);
    assert_eq!(record.closed_date, Some(date(3, 1)));
    let position = LoanRepository::position(&store, loan).unwrap();
    assert_eq!(position.outstanding_principal, Decimal::ZERO);
    assert_eq!(position.interest_overpaid, Decimal::ZERO);
}

#[test]
fn payment_beyond_principal_is_interest_and_loan_stays_closed() {
    let mut store = RecordStore::new();
    let loan = LoanRepository::create_loan(&mut store, new_loan("HBL-003", dec!(10000))).unwrap();
    LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Payment,
        dec!(10000),
        date(2, 1),
        "Full repayment".to_owned(),
        date(2, 1),
    )
    .unwrap();

    let outcome = LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Payment,
        dec!(500),
        date(3, 1),
        "Interest".to_owned(),
        date(3, 1),
    )
    .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Unchanged);

    let position = LoanRepository::position(&store, loan).unwrap();
    assert_eq!(position.total_paid, dec!(10500));
    assert_eq!(position.principal_paid, dec!(10000));
    assert_eq!(position.interest_overpaid, dec!(500));
    assert_eq!(position.outstanding_principal, Decimal::ZERO);

    let record = store.loan(loan).unwrap();
    assert_eq!(record.status, LoanStatus::Closed);
    assert_eq!(record.closed_date, Some(date(2, 1)));
}

#[test]
fn new_disbursement_reopens_a_closed_loan() {
    let mut store = RecordStore::new();
    let loan = LoanRepository::create_loan(&mut store, new_loan("HBL-004", dec!(5000))).unwrap();
    LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Payment,
        dec!(5000),
        date(2, 1),
        "Full repayment".to_owned(),
        date(2, 1),
    )
    .unwrap();
    assert_eq!(store.loan(loan).unwrap().status, LoanStatus::Closed);

    let outcome = LoanRepository::post_entry(
        &mut store,
        loan,
        LoanEntryKind::Disbursement,
        dec!(2000),
        date(4, 1),
        "Re-draw".to_owned(),
        date(4, 1),
    )
    .unwrap();
    assert_eq!(outcome, ReconcileOutcome::Reopened);

    let record = store.loan(loan).unwrap();
    assert_eq!(record.status, LoanStatus::Active);
    assert_eq!(record.closed_date, None);
    assert_eq!(
        LoanRepository::position(&store, loan)
            .unwrap()
            .outstanding_principal,
        dec!(2000)
    );
}

#[test]
fn deal_numbers_are_unique() {
    let mut store = RecordStore::new();
    LoanRepository::create_loan(&mut store, new_loan("HBL-005", dec!(1000))).unwrap();
    assert_eq!(
        LoanRepository::create_loan(&mut store, new_loan("HBL-005", dec!(2000))),
        Err(LoanError::DuplicateDealNumber("HBL-005".to_owned()))
    );
}

#[test]
fn portfolio_summary_counts_active_loans_only() {
    let mut store = RecordStore::new();
    let open = LoanRepository::create_loan(&mut store, new_loan("HBL-006", dec!(8000))).unwrap();
    let closed = LoanRepository::create_loan(&mut store, new_loan("HBL-007", dec!(3000))).unwrap();
    LoanRepository::post_entry(
        &mut store,
        closed,
        LoanEntryKind::Payment,
        dec!(3000),
        date(2, 1),
        "Full repayment".to_owned(),
        date(2, 1),
    )
    .unwrap();
    LoanRepository::post_entry(
        &mut store,
        open,
        LoanEntryKind::Payment,
        dec!(1000),
        date(2, 1),
        "Installment".to_owned(),
        date(2, 1),
    )
    .unwrap();

    let summary = LoanRepository::portfolio_summary(&store);
    assert_eq!(summary.active_count, 1);
    assert_eq!(summary.total_active_disbursed, dec!(8000));
    assert_eq!(summary.total_active_outstanding, dec!(7000));
}
