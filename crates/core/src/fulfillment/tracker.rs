//! Received/remaining quantity derivation per purchase order line.

use rust_decimal::Decimal;
use stockbook_shared::types::PurchaseOrderLineId;

use crate::inventory::ReceiptStatus;

/// A goods-receipt line as seen by the fulfillment tracker.
#[derive(Debug, Clone)]
pub struct ReceiptLineRef {
    /// The purchase order line this receipt line fulfills.
    pub order_line: PurchaseOrderLineId,
    /// Quantity received on this line.
    pub quantity: Decimal,
    /// Status of the parent receipt.
    pub receipt_status: ReceiptStatus,
}

/// Fulfillment state of one purchase order line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFulfillment {
    /// Quantity originally ordered.
    pub ordered: Decimal,
    /// Quantity received so far (confirmed receipts only).
    pub received: Decimal,
    /// Quantity still due: max(0, ordered - received).
    pub remaining: Decimal,
    /// True once received >= ordered.
    pub fully_received: bool,
}

/// Order fulfillment tracker.
///
/// Reports only; the write-time rule "a new receipt line must not exceed the
/// line's remaining quantity" belongs to the command layer, which queries
/// this tracker for the bound.
pub struct FulfillmentTracker;

impl FulfillmentTracker {
    /// Sum of quantities received against an order line, counting only lines
    /// whose parent receipt is confirmed.
    #[must_use]
    pub fn received_quantity(
        order_line: PurchaseOrderLineId,
        receipt_lines: &[ReceiptLineRef],
    ) -> Decimal {
        receipt_lines
            .iter()
            .filter(|line| {
                line.order_line == order_line && line.receipt_status.counts_toward_stock()
            })
            .map(|line| line.quantity)
            .sum()
    }

    /// Quantity still due on an order line, floored at zero.
    #[must_use]
    pub fn remaining_quantity(ordered: Decimal, received: Decimal) -> Decimal {
        (ordered - received).max(Decimal::ZERO)
    }

    /// Full fulfillment snapshot for one order line.
    #[must_use]
    pub fn for_line(
        order_line: PurchaseOrderLineId,
        ordered: Decimal,
        receipt_lines: &[ReceiptLineRef],
    ) -> LineFulfillment {
        let received = Self::received_quantity(order_line, receipt_lines);
        LineFulfillment {
            ordered,
            received,
            remaining: Self::remaining_quantity(ordered, received),
            fully_received: received >= ordered,
        }
    }
}
