//! Bank account ledger engine.
//!
//! Balance = opening balance + deposits − withdrawals, derived from the
//! entry log. The stored `current_balance` on an account is a display cache
//! only; this module is the authority.

pub mod service;
pub mod types;

pub use service::BankLedgerService;
pub use types::{BankEntryKind, BankEntryView, LedgerRow};
