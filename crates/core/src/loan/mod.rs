//! Credit-card-loan ledger engine.
//!
//! Disbursements raise what is owed, payments lower it; anything paid beyond
//! the disbursed total is captured as interest rather than negative
//! outstanding. A loan's `status`/`closed_date` are cached projections kept
//! honest by an explicit reconcile step after every ledger write.

pub mod service;
pub mod types;

pub use service::LoanLedgerService;
pub use types::{
    LoanEntryKind, LoanEntryView, LoanPosition, LoanStatus, PortfolioSummary, ReconcileOutcome,
    StatusProjection,
};
