//! Catalog repository: products and warehouses.
//!
//! Records with transaction history are never deleted, only deactivated;
//! every derived balance depends on old rows staying put.

use chrono::Utc;
use rust_decimal::Decimal;

use stockbook_shared::types::{ProductId, WarehouseId};

use crate::entities::{Product, Warehouse};
use crate::store::RecordStore;

/// Error types for catalog operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Warehouse not found.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// SKUs are unique.
    #[error("SKU '{0}' already exists")]
    DuplicateSku(String),

    /// Names must be non-empty.
    #[error("Name must not be empty")]
    EmptyName,

    /// Prices must not be negative.
    #[error("Price must not be negative, got {0}")]
    NegativePrice(Decimal),
}

/// Input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Display name.
    pub name: String,
    /// Stock-keeping unit, unique.
    pub sku: String,
    /// Unit of measure code.
    pub unit_code: String,
    /// Configured cost price.
    pub cost_price: Decimal,
    /// Default selling price.
    pub selling_price: Decimal,
    /// Pieces per carton; zero for products without carton packing.
    pub pcs_per_carton: u32,
    /// Square feet per piece; zero for non-tile products.
    pub sqft_per_pcs: Decimal,
    /// Low-stock alert threshold; zero disables the alert.
    pub min_stock_level: Decimal,
}

/// Catalog repository.
pub struct CatalogRepository;

impl CatalogRepository {
    /// Creates a product.
    pub fn create_product(
        store: &mut RecordStore,
        input: NewProduct,
    ) -> Result<ProductId, CatalogError> {
        if input.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if input.cost_price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(input.cost_price));
        }
        if input.selling_price < Decimal::ZERO {
            return Err(CatalogError::NegativePrice(input.selling_price));
        }
        if store.products().any(|product| product.sku == input.sku) {
            return Err(CatalogError::DuplicateSku(input.sku));
        }
        let id = ProductId::new();
        store.products.insert(
            id,
            Product {
                id,
                name: input.name,
                sku: input.sku,
                unit_code: input.unit_code,
                cost_price: input.cost_price,
                selling_price: input.selling_price,
                pcs_per_carton: input.pcs_per_carton,
                sqft_per_pcs: input.sqft_per_pcs,
                min_stock_level: input.min_stock_level,
                is_active: true,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Creates a warehouse.
    pub fn create_warehouse(
        store: &mut RecordStore,
        name: &str,
        location: &str,
    ) -> Result<WarehouseId, CatalogError> {
        if name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        let id = WarehouseId::new();
        store.warehouses.insert(
            id,
            Warehouse {
                id,
                name: name.to_owned(),
                location: location.to_owned(),
                is_active: true,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Hides a product from new transactions. Its history keeps counting.
    pub fn deactivate_product(
        store: &mut RecordStore,
        product: ProductId,
    ) -> Result<(), CatalogError> {
        let record = store
            .products
            .get_mut(&product)
            .ok_or(CatalogError::ProductNotFound(product))?;
        record.is_active = false;
        Ok(())
    }

    /// Hides a warehouse from new transactions.
    pub fn deactivate_warehouse(
        store: &mut RecordStore,
        warehouse: WarehouseId,
    ) -> Result<(), CatalogError> {
        let record = store
            .warehouses
            .get_mut(&warehouse)
            .ok_or(CatalogError::WarehouseNotFound(warehouse))?;
        record.is_active = false;
        Ok(())
    }
}
