//! Bank ledgers and party statements through their repositories.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use common::date;
use stockbook_core::bank::BankEntryKind;
use stockbook_core::party::{AgingCategory, PartyEntryKind, PartyLedgerError};
use stockbook_store::RecordStore;
use stockbook_store::repositories::{
    BankError, BankRepository, NewBankAccount, NewPartyEntry, PartyError, PartyRepository,
};

fn account(store: &mut RecordStore, opening: Decimal) -> stockbook_shared::types::BankAccountId {
    BankRepository::create_account(
        store,
        NewBankAccount {
            name: "HBL Current".to_owned(),
            account_number: "0012345678".to_owned(),
            opening_balance: opening,
        },
    )
}

#[test]
fn running_balance_orders_by_date_not_insertion() {
    let mut store = RecordStore::new();
    let acct = account(&mut store, dec!(1000));

    // Posted out of date order.
    BankRepository::post_entry(
        &mut store,
        acct,
        BankEntryKind::Withdrawal,
        dec!(300),
        date(1, 20),
        "Rent".to_owned(),
    )
    .unwrap();
    BankRepository::post_entry(
        &mut store,
        acct,
        BankEntryKind::Deposit,
        dec!(500),
        date(1, 5),
        "Cash deposit".to_owned(),
    )
    .unwrap();

    let rows = BankRepository::ledger_rows(&store, acct, None).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].entry.transaction_date, date(1, 5));
    assert_eq!(rows[0].balance, dec!(1500));
    assert_eq!(rows[1].balance, dec!(1200));

    assert_eq!(
        BankRepository::current_balance(&store, acct, None).unwrap(),
        dec!(1200)
    );
    assert_eq!(store.bank_account(acct).unwrap().current_balance, dec!(1200));
}

#[test]
fn period_balance_still_applies_full_opening_balance() {
    let mut store = RecordStore::new();
    let acct = account(&mut store, dec!(1000));
    BankRepository::post_entry(
        &mut store,
        acct,
        BankEntryKind::Deposit,
        dec!(200),
        date(1, 10),
        "January deposit".to_owned(),
    )
    .unwrap();
    BankRepository::post_entry(
        &mut store,
        acct,
        BankEntryKind::Deposit,
        dec!(400),
        date(2, 10),
        "February deposit".to_owned(),
    )
    .unwrap();

    let february = date(2, 1)..=date(2, 28);
    assert_eq!(
        BankRepository::current_balance(&store, acct, Some(&february)).unwrap(),
        dec!(1400)
    );
}

#[test]
fn overdraft_is_allowed_but_zero_amounts_are_not() {
    let mut store = RecordStore::new();
    let acct = account(&mut store, dec!(100));

    BankRepository::post_entry(
        &mut store,
        acct,
        BankEntryKind::Withdrawal,
        dec!(250),
        date(1, 10),
        "Cheque".to_owned(),
    )
    .unwrap();
    assert_eq!(
        BankRepository::current_balance(&store, acct, None).unwrap(),
        dec!(-150)
    );

    assert_eq!(
        BankRepository::post_entry(
            &mut store,
            acct,
            BankEntryKind::Deposit,
            Decimal::ZERO,
            date(1, 11),
            "Nothing".to_owned(),
        ),
        Err(BankError::NonPositiveAmount(Decimal::ZERO))
    );
}

#[test]
fn statement_runs_sign_rules_and_totals() {
    let mut store = RecordStore::new();
    let customer = PartyRepository::create_customer(&mut store, "Builder One", "", "").unwrap();

    PartyRepository::set_opening_balance(&mut store, customer, dec!(1000), date(1, 1)).unwrap();
    PartyRepository::post_entry(
        &mut store,
        customer,
        NewPartyEntry {
            kind: PartyEntryKind::Sale,
            amount: dec!(500),
            transaction_date: date(1, 10),
            reference: None,
            description: "Invoice".to_owned(),
        },
    )
    .unwrap();
    PartyRepository::post_entry(
        &mut store,
        customer,
        NewPartyEntry {
            kind: PartyEntryKind::Payment,
            amount: dec!(300),
            transaction_date: date(1, 15),
            reference: None,
            description: "Cash".to_owned(),
        },
    )
    .unwrap();
    PartyRepository::post_entry(
        &mut store,
        customer,
        NewPartyEntry {
            kind: PartyEntryKind::Adjustment,
            amount: dec!(-50),
            transaction_date: date(1, 20),
            reference: None,
            description: "Discount".to_owned(),
        },
    )
    .unwrap();

    let (lines, totals) = PartyRepository::statement(&store, customer).unwrap();
    assert_eq!(lines.len(), 4);
    // Newest first; running balances replayed chronologically were
    // 1000, 1500, 1200, 1150.
    assert_eq!(lines[0].balance, dec!(1150));
    assert_eq!(lines[1].balance, dec!(1200));
    assert_eq!(lines[2].balance, dec!(1500));
    assert_eq!(lines[3].balance, dec!(1000));
    assert_eq!(totals.current_balance, dec!(1150));
    assert_eq!(
        PartyRepository::current_balance(&store, customer).unwrap(),
        dec!(1150)
    );
    assert_eq!(
        store.party(customer).unwrap().current_balance,
        dec!(1150)
    );
}

#[test]
fn opening_balance_is_idempotent() {
    let mut store = RecordStore::new();
    let customer = PartyRepository::create_customer(&mut store, "Builder One", "", "").unwrap();

    PartyRepository::set_opening_balance(&mut store, customer, dec!(1000), date(1, 1)).unwrap();
    PartyRepository::set_opening_balance(&mut store, customer, dec!(750), date(1, 1)).unwrap();

    let (lines, _) = PartyRepository::statement(&store, customer).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(
        PartyRepository::current_balance(&store, customer).unwrap(),
        dec!(750)
    );
}

#[test]
fn negative_amounts_only_on_adjustments() {
    let mut store = RecordStore::new();
    let customer = PartyRepository::create_customer(&mut store, "Builder One", "", "").unwrap();

    let result = PartyRepository::post_entry(
        &mut store,
        customer,
        NewPartyEntry {
            kind: PartyEntryKind::Payment,
            amount: dec!(-100),
            transaction_date: date(1, 10),
            reference: None,
            description: "Bad".to_owned(),
        },
    );
    assert_eq!(
        result,
        Err(PartyError::Ledger(PartyLedgerError::NegativeAmount {
            kind: PartyEntryKind::Payment,
        }))
    );
}

#[test]
fn receivables_aging_buckets_at_thirty_days() {
    let mut store = RecordStore::new();
    let current = PartyRepository::create_customer(&mut store, "Fresh Debtor", "", "").unwrap();
    let overdue = PartyRepository::create_customer(&mut store, "Stale Debtor", "", "").unwrap();
    let settled = PartyRepository::create_customer(&mut store, "Paid Up", "", "").unwrap();

    let sale = |store: &mut RecordStore, party, amount, when| {
        PartyRepository::post_entry(
            store,
            party,
            NewPartyEntry {
                kind: PartyEntryKind::Sale,
                amount,
                transaction_date: when,
                reference: None,
                description: "Invoice".to_owned(),
            },
        )
        .unwrap();
    };
    sale(&mut store, current, dec!(400), date(3, 20));
    sale(&mut store, overdue, dec!(900), date(1, 10));
    sale(&mut store, settled, dec!(100), date(1, 10));
    PartyRepository::post_entry(
        &mut store,
        settled,
        NewPartyEntry {
            kind: PartyEntryKind::Payment,
            amount: dec!(100),
            transaction_date: date(2, 1),
            reference: None,
            description: "Cash".to_owned(),
        },
    )
    .unwrap();

    let as_of = date(4, 1);
    let (rows, summary) = PartyRepository::receivables_aging(&store, as_of);

    // Settled customer has no positive balance and is skipped.
    assert_eq!(rows.len(), 2);
    let row = |party| rows.iter().find(|r| r.party == party).unwrap();
    assert_eq!(row(current).category, AgingCategory::Current);
    assert_eq!(row(overdue).category, AgingCategory::Overdue);
    assert_eq!(summary.total, dec!(1300));
    assert_eq!(summary.current, dec!(400));
    assert_eq!(summary.overdue, dec!(900));
}
