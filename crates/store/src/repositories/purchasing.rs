//! Purchasing repository: purchase orders, goods receipts, and fulfillment.
//!
//! Receipts are drafted, then confirmed. Confirmation is the moment stock
//! and fulfillment change; cancelling a confirmed receipt reverses both by
//! status filter alone. The over-receipt guard binds new receipt lines to
//! the remaining quantity derived from confirmed receipts, so parallel
//! drafts can together exceed an order line until one of them is confirmed.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use stockbook_core::fulfillment::{FulfillmentTracker, LineFulfillment};
use stockbook_core::inventory::ReceiptStatus;
use stockbook_shared::types::{
    GoodsReceiptId, GoodsReceiptLineId, PartyId, ProductId, PurchaseOrderId, PurchaseOrderLineId,
    WarehouseId,
};

use crate::entities::{
    GoodsReceipt, GoodsReceiptLine, PartyKind, PurchaseOrder, PurchaseOrderLine,
    PurchaseOrderStatus,
};
use crate::store::{RecordError, RecordStore};

/// Error types for purchasing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PurchasingError {
    /// Supplier party not found.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(PartyId),

    /// The party exists but is not a supplier.
    #[error("Party {0} is not a supplier")]
    NotASupplier(PartyId),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product exists but is inactive.
    #[error("Product {0} is inactive")]
    ProductInactive(ProductId),

    /// Warehouse not found.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// Purchase order not found.
    #[error("Purchase order not found: {0}")]
    OrderNotFound(PurchaseOrderId),

    /// Purchase order line not found.
    #[error("Purchase order line not found: {0}")]
    OrderLineNotFound(PurchaseOrderLineId),

    /// Goods receipt not found.
    #[error("Goods receipt not found: {0}")]
    ReceiptNotFound(GoodsReceiptId),

    /// An order needs at least one line.
    #[error("Purchase order must have at least one line")]
    EmptyOrder,

    /// A receipt needs at least one line.
    #[error("Goods receipt must have at least one line")]
    EmptyReceipt,

    /// Quantities must be positive.
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Unit costs must not be negative.
    #[error("Unit cost must not be negative, got {0}")]
    NegativeUnitCost(Decimal),

    /// The order is cancelled and cannot take this operation.
    #[error("Purchase order {0} is cancelled")]
    OrderCancelled(PurchaseOrderId),

    /// A receipt line points at an order line from a different order.
    #[error("Order line {line} does not belong to order {order}")]
    LineOrderMismatch {
        /// The offending order line.
        line: PurchaseOrderLineId,
        /// The order the receipt is against.
        order: PurchaseOrderId,
    },

    /// A receipt line would exceed what is still due on the order line.
    #[error("Requested {requested} exceeds remaining {remaining} on order line {line}")]
    QuantityExceedsRemaining {
        /// The order line.
        line: PurchaseOrderLineId,
        /// Quantity requested across the new receipt's lines.
        requested: Decimal,
        /// Quantity still due per confirmed receipts.
        remaining: Decimal,
    },

    /// Confirm requires a draft receipt.
    #[error("Goods receipt {receipt} is {status:?}, expected draft")]
    NotADraft {
        /// The receipt.
        receipt: GoodsReceiptId,
        /// Its actual status.
        status: ReceiptStatus,
    },

    /// The receipt is already cancelled.
    #[error("Goods receipt {0} is already cancelled")]
    ReceiptAlreadyCancelled(GoodsReceiptId),

    /// An order with live receipts cannot be cancelled.
    #[error("Purchase order {0} has receipts that are not cancelled")]
    HasLiveReceipts(PurchaseOrderId),

    /// Structural store failure.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Input for one purchase order line.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrderLine {
    /// Product ordered.
    pub product: ProductId,
    /// Quantity ordered.
    pub quantity: Decimal,
    /// Agreed unit cost.
    pub unit_cost: Decimal,
}

/// Input for creating a purchase order.
#[derive(Debug, Clone)]
pub struct NewPurchaseOrder {
    /// The supplier party.
    pub supplier: PartyId,
    /// Order date.
    pub order_date: NaiveDate,
    /// Expected arrival date, if the supplier gave one.
    pub expected_date: Option<NaiveDate>,
    /// Order lines.
    pub lines: Vec<NewPurchaseOrderLine>,
}

/// Input for one goods receipt line.
#[derive(Debug, Clone)]
pub struct NewGoodsReceiptLine {
    /// The purchase order line being fulfilled.
    pub order_line: PurchaseOrderLineId,
    /// Warehouse this line's goods landed in, if recorded.
    pub warehouse: Option<WarehouseId>,
    /// Quantity received.
    pub quantity: Decimal,
}

/// Input for creating a goods receipt.
#[derive(Debug, Clone)]
pub struct NewGoodsReceipt {
    /// The order being fulfilled.
    pub order: PurchaseOrderId,
    /// Receipt date.
    pub receipt_date: NaiveDate,
    /// Receipt lines.
    pub lines: Vec<NewGoodsReceiptLine>,
}

/// Fulfillment snapshot for a whole purchase order.
#[derive(Debug, Clone)]
pub struct OrderFulfillment {
    /// Per-line fulfillment, in line insertion order.
    pub lines: Vec<(PurchaseOrderLineId, LineFulfillment)>,
    /// True once every line is fully received.
    pub fully_received: bool,
}

/// Purchasing repository.
pub struct PurchasingRepository;

impl PurchasingRepository {
    /// Creates a purchase order with its lines.
    pub fn create_order(
        store: &mut RecordStore,
        input: NewPurchaseOrder,
    ) -> Result<PurchaseOrderId, PurchasingError> {
        let supplier = store
            .party(input.supplier)
            .ok_or(PurchasingError::SupplierNotFound(input.supplier))?;
        if supplier.kind != PartyKind::Supplier {
            return Err(PurchasingError::NotASupplier(input.supplier));
        }
        if input.lines.is_empty() {
            return Err(PurchasingError::EmptyOrder);
        }
        for line in &input.lines {
            Self::validate_product(store, line.product)?;
            if line.quantity <= Decimal::ZERO {
                return Err(PurchasingError::NonPositiveQuantity(line.quantity));
            }
            if line.unit_cost < Decimal::ZERO {
                return Err(PurchasingError::NegativeUnitCost(line.unit_cost));
            }
        }

        let id = PurchaseOrderId::new();
        store.purchase_orders.insert(
            id,
            PurchaseOrder {
                id,
                order_number: RecordStore::document_number("PO", id.into_inner()),
                supplier: input.supplier,
                order_date: input.order_date,
                expected_date: input.expected_date,
                status: PurchaseOrderStatus::Open,
                created_at: Utc::now(),
            },
        );
        for line in input.lines {
            store.purchase_order_lines.push(PurchaseOrderLine {
                id: PurchaseOrderLineId::new(),
                order: id,
                product: line.product,
                quantity: line.quantity,
                unit_cost: line.unit_cost,
            });
        }
        Ok(id)
    }

    /// Cancels a purchase order. Refused while any of its receipts is still
    /// live (draft or received); cancel those first.
    pub fn cancel_order(
        store: &mut RecordStore,
        order: PurchaseOrderId,
    ) -> Result<(), PurchasingError> {
        let record = store
            .purchase_orders
            .get(&order)
            .ok_or(PurchasingError::OrderNotFound(order))?;
        if record.status == PurchaseOrderStatus::Cancelled {
            return Err(PurchasingError::OrderCancelled(order));
        }
        let has_live_receipts = store
            .goods_receipts
            .values()
            .any(|receipt| receipt.order == order && receipt.status != ReceiptStatus::Cancelled);
        if has_live_receipts {
            return Err(PurchasingError::HasLiveReceipts(order));
        }
        if let Some(record) = store.purchase_orders.get_mut(&order) {
            record.status = PurchaseOrderStatus::Cancelled;
        }
        Ok(())
    }

    /// Drafts a goods receipt against an open order.
    ///
    /// Every line must belong to the order and must not push the line's
    /// cumulative confirmed-received quantity past what was ordered. Unit
    /// costs are copied from the order lines. The receipt starts in `Draft`
    /// and touches nothing until confirmed.
    pub fn create_receipt(
        store: &mut RecordStore,
        input: NewGoodsReceipt,
    ) -> Result<GoodsReceiptId, PurchasingError> {
        let order = store
            .purchase_order(input.order)
            .ok_or(PurchasingError::OrderNotFound(input.order))?;
        if order.status == PurchaseOrderStatus::Cancelled {
            return Err(PurchasingError::OrderCancelled(input.order));
        }
        if input.lines.is_empty() {
            return Err(PurchasingError::EmptyReceipt);
        }

        // Validate each line, aggregating requested quantity per order line
        // so two lines against the same order line are bounded together.
        let refs = store.receipt_line_refs()?;
        let mut requested: Vec<(PurchaseOrderLineId, Decimal)> = Vec::new();
        for line in &input.lines {
            if line.quantity <= Decimal::ZERO {
                return Err(PurchasingError::NonPositiveQuantity(line.quantity));
            }
            if let Some(warehouse) = line.warehouse {
                if store.warehouse(warehouse).is_none() {
                    return Err(PurchasingError::WarehouseNotFound(warehouse));
                }
            }
            let order_line = store
                .purchase_order_lines
                .iter()
                .find(|l| l.id == line.order_line)
                .ok_or(PurchasingError::OrderLineNotFound(line.order_line))?;
            if order_line.order != input.order {
                return Err(PurchasingError::LineOrderMismatch {
                    line: line.order_line,
                    order: input.order,
                });
            }
            match requested.iter_mut().find(|(id, _)| *id == line.order_line) {
                Some((_, total)) => *total += line.quantity,
                None => requested.push((line.order_line, line.quantity)),
            }
        }
        for (order_line_id, total) in &requested {
            let order_line = store
                .purchase_order_lines
                .iter()
                .find(|l| l.id == *order_line_id)
                .ok_or(PurchasingError::OrderLineNotFound(*order_line_id))?;
            let fulfillment =
                FulfillmentTracker::for_line(*order_line_id, order_line.quantity, &refs);
            if *total > fulfillment.remaining {
                return Err(PurchasingError::QuantityExceedsRemaining {
                    line: *order_line_id,
                    requested: *total,
                    remaining: fulfillment.remaining,
                });
            }
        }

        let id = GoodsReceiptId::new();
        store.goods_receipts.insert(
            id,
            GoodsReceipt {
                id,
                receipt_number: RecordStore::document_number("GR", id.into_inner()),
                order: input.order,
                receipt_date: input.receipt_date,
                status: ReceiptStatus::Draft,
                created_at: Utc::now(),
            },
        );
        for line in input.lines {
            // Validated above; the unwrap-free lookup is repeated for the
            // denormalized product and unit cost.
            let (product, unit_cost) = store
                .purchase_order_lines
                .iter()
                .find(|l| l.id == line.order_line)
                .map(|l| (l.product, l.unit_cost))
                .ok_or(PurchasingError::OrderLineNotFound(line.order_line))?;
            let seq = store.next_seq();
            store.goods_receipt_lines.push(GoodsReceiptLine {
                id: GoodsReceiptLineId::new(),
                receipt: id,
                order_line: line.order_line,
                warehouse: line.warehouse,
                product,
                quantity: line.quantity,
                unit_cost,
                seq,
            });
        }
        Ok(id)
    }

    /// Confirms a draft receipt. This is the point where its lines start
    /// counting toward stock and fulfillment.
    pub fn confirm_receipt(
        store: &mut RecordStore,
        receipt: GoodsReceiptId,
    ) -> Result<(), PurchasingError> {
        let record = store
            .goods_receipts
            .get(&receipt)
            .ok_or(PurchasingError::ReceiptNotFound(receipt))?;
        if record.status != ReceiptStatus::Draft {
            return Err(PurchasingError::NotADraft {
                receipt,
                status: record.status,
            });
        }
        let order = record.order;
        if store
            .purchase_order(order)
            .is_some_and(|o| o.status == PurchaseOrderStatus::Cancelled)
        {
            return Err(PurchasingError::OrderCancelled(order));
        }
        if let Some(record) = store.goods_receipts.get_mut(&receipt) {
            record.status = ReceiptStatus::Received;
        }
        Ok(())
    }

    /// Cancels a draft or confirmed receipt. For a confirmed receipt this
    /// reverses its stock and fulfillment contribution purely through the
    /// status filter.
    pub fn cancel_receipt(
        store: &mut RecordStore,
        receipt: GoodsReceiptId,
    ) -> Result<(), PurchasingError> {
        let record = store
            .goods_receipts
            .get_mut(&receipt)
            .ok_or(PurchasingError::ReceiptNotFound(receipt))?;
        if record.status == ReceiptStatus::Cancelled {
            return Err(PurchasingError::ReceiptAlreadyCancelled(receipt));
        }
        record.status = ReceiptStatus::Cancelled;
        Ok(())
    }

    /// Fulfillment snapshot for one order line.
    pub fn line_fulfillment(
        store: &RecordStore,
        order_line: PurchaseOrderLineId,
    ) -> Result<LineFulfillment, PurchasingError> {
        let line = store
            .purchase_order_lines
            .iter()
            .find(|l| l.id == order_line)
            .ok_or(PurchasingError::OrderLineNotFound(order_line))?;
        Ok(FulfillmentTracker::for_line(
            order_line,
            line.quantity,
            &store.receipt_line_refs()?,
        ))
    }

    /// Fulfillment snapshot for a whole order.
    pub fn order_fulfillment(
        store: &RecordStore,
        order: PurchaseOrderId,
    ) -> Result<OrderFulfillment, PurchasingError> {
        if store.purchase_order(order).is_none() {
            return Err(PurchasingError::OrderNotFound(order));
        }
        let refs = store.receipt_line_refs()?;
        let lines: Vec<(PurchaseOrderLineId, LineFulfillment)> = store
            .purchase_order_lines(order)
            .map(|line| {
                (
                    line.id,
                    FulfillmentTracker::for_line(line.id, line.quantity, &refs),
                )
            })
            .collect();
        let fully_received =
            !lines.is_empty() && lines.iter().all(|(_, f)| f.fully_received);
        Ok(OrderFulfillment {
            lines,
            fully_received,
        })
    }

    fn validate_product(store: &RecordStore, product: ProductId) -> Result<(), PurchasingError> {
        let record = store
            .product(product)
            .ok_or(PurchasingError::ProductNotFound(product))?;
        if !record.is_active {
            return Err(PurchasingError::ProductInactive(product));
        }
        Ok(())
    }
}
