//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Per-domain errors (inventory, ledger, loan, store) are defined next to the
/// code that raises them; this type is the coarse classification used at the
/// outer boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (bad input at the command boundary).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Business rule violation.
    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    /// Consistency error: a record references data it must not reference.
    /// These must fail loudly; silent correction would corrupt derived
    /// balances.
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Conflict (e.g., duplicate unique key).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Record store error.
    #[error("Store error: {0}")]
    Store(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Consistency(_) => "CONSISTENCY_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Store(_) => "STORE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the failure is safe to degrade to an empty/zero value
    /// on a report-only read path. Write paths must always propagate.
    #[must_use]
    pub const fn is_report_degradable(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Store(_))
    }
}
