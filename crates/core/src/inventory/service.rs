//! On-hand quantity and stock value aggregation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use stockbook_shared::types::{ProductId, WarehouseId};

use super::types::{
    CartonBreakdown, LowStockAlert, ProductStockInfo, ReceiptLineView, SalesLineView,
};

/// Inventory valuation engine.
///
/// Pure aggregation over record views: no lookups, no side effects. Absent
/// records contribute zero. Callers that want report-style "degrade to zero on
/// failure" behavior do so at the store boundary, not here.
pub struct InventoryService;

impl InventoryService {
    /// Derives the on-hand quantity for a product, optionally scoped to one
    /// warehouse.
    ///
    /// Formula: Σ received goods-receipt line quantities − Σ delivered
    /// sales-order line quantities, clamped at zero. A negative raw
    /// difference indicates a data error upstream and is never surfaced as
    /// negative stock.
    #[must_use]
    pub fn on_hand_quantity(
        product: ProductId,
        warehouse: Option<WarehouseId>,
        receipt_lines: &[ReceiptLineView],
        sales_lines: &[SalesLineView],
    ) -> Decimal {
        let received: Decimal = receipt_lines
            .iter()
            .filter(|line| line.product == product && line.receipt_status.counts_toward_stock())
            .filter(|line| warehouse.is_none_or(|w| line.warehouse == Some(w)))
            .map(|line| line.quantity)
            .sum();

        let delivered: Decimal = sales_lines
            .iter()
            .filter(|line| line.product == product && line.order_status.counts_as_delivered())
            .filter(|line| warehouse.is_none_or(|w| line.warehouse == w))
            .map(|line| line.quantity)
            .sum();

        (received - delivered).max(Decimal::ZERO)
    }

    /// Unit cost of the most recent received goods-receipt line for a
    /// product, ordered by receipt date then insertion sequence.
    #[must_use]
    pub fn latest_received_unit_cost(
        product: ProductId,
        receipt_lines: &[ReceiptLineView],
    ) -> Option<Decimal> {
        receipt_lines
            .iter()
            .filter(|line| line.product == product && line.receipt_status.counts_toward_stock())
            .max_by_key(|line| (line.receipt_date, line.seq))
            .map(|line| line.unit_cost)
    }

    /// Derives total stock value: on-hand quantity times the latest received
    /// unit cost, falling back to the product's configured cost price when no
    /// receipts exist.
    #[must_use]
    pub fn stock_value(
        info: &ProductStockInfo,
        receipt_lines: &[ReceiptLineView],
        sales_lines: &[SalesLineView],
    ) -> Decimal {
        let quantity = Self::on_hand_quantity(info.product, None, receipt_lines, sales_lines);
        let unit_cost = Self::latest_received_unit_cost(info.product, receipt_lines)
            .unwrap_or(info.cost_price);
        quantity * unit_cost
    }

    /// Scans products for low stock: on-hand at or below `min_stock_level`,
    /// with a zero threshold disabling the alert.
    #[must_use]
    pub fn low_stock(
        products: &[ProductStockInfo],
        receipt_lines: &[ReceiptLineView],
        sales_lines: &[SalesLineView],
    ) -> Vec<LowStockAlert> {
        products
            .iter()
            .filter(|info| info.min_stock_level > Decimal::ZERO)
            .filter_map(|info| {
                let quantity =
                    Self::on_hand_quantity(info.product, None, receipt_lines, sales_lines);
                (quantity <= info.min_stock_level).then(|| LowStockAlert {
                    product: info.product,
                    current_quantity: quantity,
                    min_quantity: info.min_stock_level,
                })
            })
            .collect()
    }

    /// Splits a piece quantity into whole cartons plus loose pieces for
    /// display. Returns `None` when the product has no carton packing.
    #[must_use]
    pub fn carton_breakdown(quantity: Decimal, pcs_per_carton: u32) -> Option<CartonBreakdown> {
        if pcs_per_carton == 0 {
            return None;
        }
        let total_pieces = quantity.trunc().to_u64()?;
        let per_carton = u64::from(pcs_per_carton);
        Some(CartonBreakdown {
            cartons: total_pieces / per_carton,
            pieces: total_pieces % per_carton,
        })
    }

    /// Square-feet coverage for tile products. Display math only.
    #[must_use]
    pub fn square_feet(quantity: Decimal, sqft_per_pcs: Decimal) -> Decimal {
        quantity * sqft_per_pcs
    }
}
