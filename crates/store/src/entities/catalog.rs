//! Product and warehouse records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_shared::types::{ProductId, WarehouseId};

/// A sellable product. Tile-trade fields (`pcs_per_carton`, `sqft_per_pcs`)
/// feed display math only and never enter quantity accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product identity.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit, unique per product.
    pub sku: String,
    /// Unit of measure code, e.g. "pcs" or "carton".
    pub unit_code: String,
    /// Configured cost price; valuation fallback when no receipts exist.
    pub cost_price: Decimal,
    /// Default selling price.
    pub selling_price: Decimal,
    /// Pieces per carton; zero means the product has no carton packing.
    pub pcs_per_carton: u32,
    /// Square feet covered per piece; zero for non-tile products.
    pub sqft_per_pcs: Decimal,
    /// Low-stock alert threshold; zero disables the alert.
    pub min_stock_level: Decimal,
    /// Inactive products are hidden from new transactions, not deleted.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A physical stock location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    /// Warehouse identity.
    pub id: WarehouseId,
    /// Display name.
    pub name: String,
    /// Free-text location.
    pub location: String,
    /// Inactive warehouses are hidden from new transactions.
    pub is_active: bool,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}
