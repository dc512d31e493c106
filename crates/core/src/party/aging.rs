//! Receivables aging over positive party balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stockbook_shared::types::PartyId;

/// Aging bucket for an outstanding balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingCategory {
    /// Outstanding 30 days or less.
    Current,
    /// Outstanding more than 30 days.
    Overdue,
}

impl AgingCategory {
    /// Classifies by days outstanding: more than 30 days is overdue.
    #[must_use]
    pub const fn classify(days_outstanding: i64) -> Self {
        if days_outstanding <= 30 {
            Self::Current
        } else {
            Self::Overdue
        }
    }
}

/// A party's position in the aging report.
#[derive(Debug, Clone, Serialize)]
pub struct AgingRow {
    /// The party owing money.
    pub party: PartyId,
    /// Outstanding balance (always positive here).
    pub balance: Decimal,
    /// Days since the party's most recent ledger activity.
    pub days_outstanding: i64,
    /// Aging bucket.
    pub category: AgingCategory,
}

/// Aging report totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgingSummary {
    /// Total outstanding receivables.
    pub total: Decimal,
    /// Portion outstanding 30 days or less.
    pub current: Decimal,
    /// Portion outstanding more than 30 days.
    pub overdue: Decimal,
}

/// Builds aging rows from (party, balance, last activity date) triples.
/// Parties without a positive balance are skipped; a party with no recorded
/// activity counts as current.
#[must_use]
pub fn aging_rows(
    balances: &[(PartyId, Decimal, Option<NaiveDate>)],
    as_of: NaiveDate,
) -> Vec<AgingRow> {
    balances
        .iter()
        .filter(|(_, balance, _)| *balance > Decimal::ZERO)
        .map(|(party, balance, last_activity)| {
            let days_outstanding = last_activity
                .map_or(0, |date| (as_of - date).num_days().max(0));
            AgingRow {
                party: *party,
                balance: *balance,
                days_outstanding,
                category: AgingCategory::classify(days_outstanding),
            }
        })
        .collect()
}

/// Sums aging rows into report totals.
#[must_use]
pub fn summarize(rows: &[AgingRow]) -> AgingSummary {
    let total: Decimal = rows.iter().map(|row| row.balance).sum();
    let current: Decimal = rows
        .iter()
        .filter(|row| row.category == AgingCategory::Current)
        .map(|row| row.balance)
        .sum();

    AgingSummary {
        total,
        current,
        overdue: total - current,
    }
}
