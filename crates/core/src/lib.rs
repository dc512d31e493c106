//! Core derived-balance engines for Stockbook.
//!
//! This crate contains pure business logic with ZERO web or store
//! dependencies. Every balance in the system (stock on hand, customer and
//! supplier balances, loan outstanding, bank balances) is derived from
//! append-only transaction records; these engines hold the derivation rules.
//!
//! # Modules
//!
//! - `inventory` - On-hand quantity and stock value from receipt/sales records
//! - `fulfillment` - Received/remaining tracking per purchase order line
//! - `party` - Customer/supplier ledger with type-driven sign rules
//! - `bank` - Bank account running balances
//! - `loan` - Credit-card-loan disbursement/payment/interest split

pub mod bank;
pub mod fulfillment;
pub mod inventory;
pub mod loan;
pub mod party;
