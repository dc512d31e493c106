//! Loan ledger domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Loan lifecycle status. Derived from the ledger and cached; the reconcile
/// step keeps cache and derivation in agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    /// Outstanding principal above zero.
    Active,
    /// Fully repaid.
    Closed,
}

/// Loan ledger entry type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanEntryKind {
    /// Money given to the borrower; increases what is owed.
    Disbursement,
    /// Repayment from the borrower; decreases what is owed.
    Payment,
}

/// A loan ledger entry as seen by the engine.
#[derive(Debug, Clone)]
pub struct LoanEntryView {
    /// Disbursement or payment.
    pub kind: LoanEntryKind,
    /// Amount (always >= 0).
    pub amount: Decimal,
    /// Transaction date.
    pub transaction_date: NaiveDate,
}

/// Derived financial position of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanPosition {
    /// Sum of disbursement entries, or the principal amount when no positive
    /// disbursement sum exists (loans predating the entry pattern).
    pub total_disbursed: Decimal,
    /// Sum of payment entries.
    pub total_paid: Decimal,
    /// Portion of payments that repaid principal: min(paid, disbursed).
    pub principal_paid: Decimal,
    /// Payments beyond principal, captured as interest/fees: max(0, paid - disbursed).
    pub interest_overpaid: Decimal,
    /// Remaining amount owed, floored at zero.
    pub outstanding_principal: Decimal,
}

/// The cached status fields as one projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProjection {
    /// Cached lifecycle status.
    pub status: LoanStatus,
    /// Date the loan closed, if closed.
    pub closed_date: Option<NaiveDate>,
}

/// What a reconcile run did to the cached status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Cache already matched the derived state.
    Unchanged,
    /// Outstanding reached zero; loan transitioned to closed.
    Closed,
    /// Outstanding rose above zero on a closed loan; reopened.
    Reopened,
}

/// Portfolio-level rollup over active loans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PortfolioSummary {
    /// Number of active loans.
    pub active_count: usize,
    /// Total disbursed across active loans.
    pub total_active_disbursed: Decimal,
    /// Total still outstanding across active loans.
    pub total_active_outstanding: Decimal,
}
