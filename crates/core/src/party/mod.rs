//! Customer/supplier ledger engine.
//!
//! A party's balance is derived from its mixed-type transaction log: sales,
//! payments, opening balances, adjustments, and returns, each with a fixed
//! sign rule (adjustments carry their own sign). The same engine serves both
//! customer and supplier ledgers.

pub mod aging;
pub mod error;
pub mod service;
pub mod types;

pub use aging::{AgingCategory, AgingRow, AgingSummary};
pub use error::PartyLedgerError;
pub use service::PartyLedgerService;
pub use types::{PartyEntryKind, PartyEntryView, StatementLine, StatementTotals};
