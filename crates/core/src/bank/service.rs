//! Bank balance derivation and running-balance series.

use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{BankEntryView, LedgerRow};

/// Bank account ledger engine.
pub struct BankLedgerService;

impl BankLedgerService {
    /// Current balance: opening balance plus the signed sum of all entries,
    /// optionally restricted to a date range (for period reports the opening
    /// balance still applies in full).
    #[must_use]
    pub fn current_balance(
        opening_balance: Decimal,
        entries: &[BankEntryView],
        range: Option<&RangeInclusive<NaiveDate>>,
    ) -> Decimal {
        let movement: Decimal = entries
            .iter()
            .filter(|entry| range.is_none_or(|r| r.contains(&entry.transaction_date)))
            .map(|entry| entry.kind.balance_delta(entry.amount))
            .sum();
        opening_balance + movement
    }

    /// Walks entries in ascending (date, seq) order from the opening
    /// balance, yielding each entry with the balance after it. One pass per
    /// call; no cursor survives the iterator.
    pub fn running_balance(
        opening_balance: Decimal,
        entries: &[BankEntryView],
    ) -> impl Iterator<Item = LedgerRow> {
        let mut ordered: Vec<BankEntryView> = entries.to_vec();
        ordered.sort_by_key(|entry| (entry.transaction_date, entry.seq));

        ordered.into_iter().scan(opening_balance, |balance, entry| {
            *balance += entry.kind.balance_delta(entry.amount);
            Some(LedgerRow {
                balance: *balance,
                entry,
            })
        })
    }
}
