//! Inventory repository: derived stock queries over the record store.
//!
//! Write paths elsewhere in this crate always use the strict functions; the
//! `*_or_zero` wrappers exist for report rendering only, where a missing
//! product degrades to zero with a warning instead of failing the whole
//! report.

use rust_decimal::Decimal;

use stockbook_core::inventory::{
    CartonBreakdown, InventoryService, LowStockAlert, ProductStockInfo,
};
use stockbook_shared::types::{ProductId, WarehouseId};

use crate::store::{RecordError, RecordStore};

/// Error types for inventory queries.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InventoryError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Warehouse not found.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// Structural store failure.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// One row of the stock overview report.
#[derive(Debug, Clone)]
pub struct StockOverviewRow {
    /// The product.
    pub product: ProductId,
    /// Derived on-hand quantity across all warehouses.
    pub on_hand: Decimal,
    /// Derived stock value.
    pub value: Decimal,
    /// Carton/pieces display breakdown, when the product has carton packing.
    pub cartons: Option<CartonBreakdown>,
    /// Square-feet coverage of the on-hand quantity.
    pub square_feet: Decimal,
}

/// Inventory repository.
pub struct InventoryRepository;

impl InventoryRepository {
    /// Derived on-hand quantity for a product, optionally scoped to one
    /// warehouse.
    pub fn on_hand(
        store: &RecordStore,
        product: ProductId,
        warehouse: Option<WarehouseId>,
    ) -> Result<Decimal, InventoryError> {
        if store.product(product).is_none() {
            return Err(InventoryError::ProductNotFound(product));
        }
        if let Some(warehouse) = warehouse {
            if store.warehouse(warehouse).is_none() {
                return Err(InventoryError::WarehouseNotFound(warehouse));
            }
        }
        Ok(InventoryService::on_hand_quantity(
            product,
            warehouse,
            &store.receipt_line_views()?,
            &store.sales_line_views()?,
        ))
    }

    /// Report-only variant of [`Self::on_hand`]: degrades to zero on
    /// failure instead of propagating.
    #[must_use]
    pub fn on_hand_or_zero(
        store: &RecordStore,
        product: ProductId,
        warehouse: Option<WarehouseId>,
    ) -> Decimal {
        Self::on_hand(store, product, warehouse).unwrap_or_else(|error| {
            tracing::warn!(%product, %error, "on-hand lookup degraded to zero");
            Decimal::ZERO
        })
    }

    /// Derived stock value for one product: on-hand quantity times the
    /// latest received unit cost, falling back to the configured cost price.
    pub fn stock_value(store: &RecordStore, product: ProductId) -> Result<Decimal, InventoryError> {
        let info = Self::stock_info(store, product)?;
        Ok(InventoryService::stock_value(
            &info,
            &store.receipt_line_views()?,
            &store.sales_line_views()?,
        ))
    }

    /// Report-only variant of [`Self::stock_value`]: degrades to zero on
    /// failure instead of propagating.
    #[must_use]
    pub fn stock_value_or_zero(store: &RecordStore, product: ProductId) -> Decimal {
        Self::stock_value(store, product).unwrap_or_else(|error| {
            tracing::warn!(%product, %error, "stock value lookup degraded to zero");
            Decimal::ZERO
        })
    }

    /// Total stock value across all active products.
    pub fn total_stock_value(store: &RecordStore) -> Result<Decimal, InventoryError> {
        let receipt_lines = store.receipt_line_views()?;
        let sales_lines = store.sales_line_views()?;
        Ok(store
            .products()
            .filter(|product| product.is_active)
            .map(|product| {
                let info = ProductStockInfo {
                    product: product.id,
                    cost_price: product.cost_price,
                    min_stock_level: product.min_stock_level,
                };
                InventoryService::stock_value(&info, &receipt_lines, &sales_lines)
            })
            .sum())
    }

    /// Active products at or below their low-stock threshold.
    pub fn low_stock(store: &RecordStore) -> Result<Vec<LowStockAlert>, InventoryError> {
        let infos: Vec<ProductStockInfo> = store
            .products()
            .filter(|product| product.is_active)
            .map(|product| ProductStockInfo {
                product: product.id,
                cost_price: product.cost_price,
                min_stock_level: product.min_stock_level,
            })
            .collect();
        Ok(InventoryService::low_stock(
            &infos,
            &store.receipt_line_views()?,
            &store.sales_line_views()?,
        ))
    }

    /// Stock overview report: one row per active product with quantity,
    /// value, and the tile display math.
    pub fn stock_overview(store: &RecordStore) -> Result<Vec<StockOverviewRow>, InventoryError> {
        let receipt_lines = store.receipt_line_views()?;
        let sales_lines = store.sales_line_views()?;
        Ok(store
            .products()
            .filter(|product| product.is_active)
            .map(|product| {
                let on_hand = InventoryService::on_hand_quantity(
                    product.id,
                    None,
                    &receipt_lines,
                    &sales_lines,
                );
                let info = ProductStockInfo {
                    product: product.id,
                    cost_price: product.cost_price,
                    min_stock_level: product.min_stock_level,
                };
                StockOverviewRow {
                    product: product.id,
                    on_hand,
                    value: InventoryService::stock_value(&info, &receipt_lines, &sales_lines),
                    cartons: InventoryService::carton_breakdown(on_hand, product.pcs_per_carton),
                    square_feet: InventoryService::square_feet(on_hand, product.sqft_per_pcs),
                }
            })
            .collect())
    }

    fn stock_info(
        store: &RecordStore,
        product: ProductId,
    ) -> Result<ProductStockInfo, InventoryError> {
        let record = store
            .product(product)
            .ok_or(InventoryError::ProductNotFound(product))?;
        Ok(ProductStockInfo {
            product: record.id,
            cost_price: record.cost_price,
            min_stock_level: record.min_stock_level,
        })
    }
}
