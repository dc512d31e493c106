//! Inventory valuation engine.
//!
//! Stock is never stored: on-hand quantity is derived on demand as
//! received goods-receipt quantities minus delivered sales quantities,
//! clamped at zero. This module implements that aggregation plus stock
//! valuation, low-stock scanning, and the tile display math.

pub mod service;
pub mod types;

pub use service::InventoryService;
pub use types::{
    CartonBreakdown, LowStockAlert, ProductStockInfo, ReceiptLineView, ReceiptStatus,
    SalesLineView, SalesOrderStatus,
};
