//! Party ledger error types.

use thiserror::Error;

use super::types::PartyEntryKind;

/// Errors raised by party ledger validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PartyLedgerError {
    /// Negative amounts are only meaningful on sign-carrying kinds
    /// (adjustments); every other kind stores a positive magnitude and gets
    /// its sign from the type rule.
    #[error("Negative amount not allowed for {kind:?} entries")]
    NegativeAmount {
        /// The offending entry kind.
        kind: PartyEntryKind,
    },

    /// Upsert-by-reference needs a reference to key on.
    #[error("Ledger upsert requires a non-empty reference")]
    MissingReference,
}
