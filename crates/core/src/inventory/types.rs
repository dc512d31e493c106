//! Inventory domain types.
//!
//! The engine never touches full records; callers project their store rows
//! into these narrow views so the aggregation stays testable without a store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ProductId, WarehouseId};

/// Goods receipt lifecycle status.
///
/// Only `Received` receipts contribute to inventory. Cancelling a received
/// receipt reverses its contribution purely through this status filter; no
/// explicit reversal bookkeeping exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    /// Receipt is being drafted; its lines do not count yet.
    Draft,
    /// Receipt confirmed; its lines count toward stock.
    Received,
    /// Receipt cancelled after confirmation; its lines no longer count.
    Cancelled,
}

impl ReceiptStatus {
    /// Returns true if lines under a receipt in this status count toward
    /// stock and fulfillment.
    #[must_use]
    pub const fn counts_toward_stock(self) -> bool {
        matches!(self, Self::Received)
    }
}

/// Sales order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesOrderStatus {
    /// Order taken, goods not yet delivered; inventory unaffected.
    Order,
    /// Goods delivered; lines decrease inventory and revenue is recognized.
    Delivered,
    /// Order cancelled.
    Cancelled,
}

impl SalesOrderStatus {
    /// Returns true if lines under an order in this status decrease stock.
    #[must_use]
    pub const fn counts_as_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// A goods-receipt line as seen by the inventory and fulfillment engines.
#[derive(Debug, Clone)]
pub struct ReceiptLineView {
    /// Product received.
    pub product: ProductId,
    /// Warehouse the goods landed in, if recorded.
    pub warehouse: Option<WarehouseId>,
    /// Quantity received on this line.
    pub quantity: Decimal,
    /// Unit cost on this line.
    pub unit_cost: Decimal,
    /// Status of the parent receipt.
    pub receipt_status: ReceiptStatus,
    /// Date of the parent receipt, used to pick the latest unit cost.
    pub receipt_date: NaiveDate,
    /// Store insertion sequence, tie-breaker for "most recent".
    pub seq: u64,
}

/// A sales-order line as seen by the inventory engine.
#[derive(Debug, Clone)]
pub struct SalesLineView {
    /// Product sold.
    pub product: ProductId,
    /// Warehouse the goods ship from.
    pub warehouse: WarehouseId,
    /// Quantity sold on this line.
    pub quantity: Decimal,
    /// Status of the parent sales order.
    pub order_status: SalesOrderStatus,
}

/// Product attributes the valuation engine needs.
#[derive(Debug, Clone)]
pub struct ProductStockInfo {
    /// The product.
    pub product: ProductId,
    /// Configured cost price, the fallback when no receipts exist.
    pub cost_price: Decimal,
    /// Low-stock threshold; zero disables the alert.
    pub min_stock_level: Decimal,
}

/// A product whose on-hand quantity is at or below its minimum stock level.
#[derive(Debug, Clone, Serialize)]
pub struct LowStockAlert {
    /// The product running low.
    pub product: ProductId,
    /// Current derived on-hand quantity.
    pub current_quantity: Decimal,
    /// Configured minimum stock level.
    pub min_quantity: Decimal,
}

/// Display-only carton/pieces breakdown for tile products.
///
/// Used for rendering quantities like "3 cartons 4 pcs"; never feeds back
/// into quantity accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartonBreakdown {
    /// Whole cartons.
    pub cartons: u64,
    /// Loose pieces beyond the last whole carton.
    pub pieces: u64,
}
