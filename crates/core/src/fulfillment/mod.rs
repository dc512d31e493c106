//! Order fulfillment tracking.
//!
//! Partial-receipt bookkeeping for purchase order lines: how much of a line
//! has arrived, how much is still due. Derived entirely from goods-receipt
//! records via status filter; confirming or cancelling a receipt changes the
//! answer with no explicit reversal entries.

pub mod tracker;

pub use tracker::{FulfillmentTracker, LineFulfillment, ReceiptLineRef};
