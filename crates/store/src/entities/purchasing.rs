//! Purchase order and goods receipt records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_core::inventory::ReceiptStatus;
use stockbook_shared::types::{
    GoodsReceiptId, GoodsReceiptLineId, PartyId, ProductId, PurchaseOrderId, PurchaseOrderLineId,
    WarehouseId,
};

/// Purchase order lifecycle status. Fulfillment progress is not a status;
/// it is derived per line from confirmed receipts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseOrderStatus {
    /// Order is live and can receive goods.
    Open,
    /// Order cancelled; no further receipts allowed.
    Cancelled,
}

/// An order placed with a supplier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Order identity.
    pub id: PurchaseOrderId,
    /// Human-facing order number, unique.
    pub order_number: String,
    /// The supplier party.
    pub supplier: PartyId,
    /// Order date.
    pub order_date: NaiveDate,
    /// Expected arrival date, if the supplier gave one.
    pub expected_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: PurchaseOrderStatus,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One product line on a purchase order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// Line identity.
    pub id: PurchaseOrderLineId,
    /// Parent order.
    pub order: PurchaseOrderId,
    /// Product ordered.
    pub product: ProductId,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Agreed unit cost.
    pub unit_cost: Decimal,
}

/// A goods receipt against a purchase order. Only `Received` receipts count
/// toward stock and fulfillment; draft and cancelled receipts are invisible
/// to every derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsReceipt {
    /// Receipt identity.
    pub id: GoodsReceiptId,
    /// Human-facing receipt number, unique.
    pub receipt_number: String,
    /// The order being fulfilled.
    pub order: PurchaseOrderId,
    /// Receipt date; orders the "latest unit cost" lookup.
    pub receipt_date: NaiveDate,
    /// Lifecycle status.
    pub status: ReceiptStatus,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One product line on a goods receipt, tied back to the order line it
/// fulfills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoodsReceiptLine {
    /// Line identity.
    pub id: GoodsReceiptLineId,
    /// Parent receipt.
    pub receipt: GoodsReceiptId,
    /// The purchase order line this fulfills.
    pub order_line: PurchaseOrderLineId,
    /// Warehouse this line's goods landed in, if recorded. Per line so one
    /// receipt can land different lines in different warehouses.
    pub warehouse: Option<WarehouseId>,
    /// Product received, denormalized from the order line.
    pub product: ProductId,
    /// Quantity received.
    pub quantity: Decimal,
    /// Unit cost, copied from the order line at receipt time.
    pub unit_cost: Decimal,
    /// Store insertion sequence; tie-breaker for "most recent cost".
    pub seq: u64,
}
