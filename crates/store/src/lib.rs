//! Record store and command layer for Stockbook.
//!
//! This crate owns the records and the write rules. Balances, stock levels,
//! and statuses are derived by the engines in `stockbook-core`; this layer
//! projects records into engine views, validates commands fully before
//! mutating, and keeps the cached display fields honest after every write.

mod classify;

pub mod entities;
pub mod repositories;
pub mod store;

pub use store::{RecordError, RecordStore};
