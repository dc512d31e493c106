//! Sales order records.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockbook_core::inventory::SalesOrderStatus;
use stockbook_shared::types::{PartyId, ProductId, SalesOrderId, SalesOrderLineId, WarehouseId};

/// How the sale was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesType {
    /// Ordered first, delivered later.
    Standard,
    /// Walk-in sale delivered at the counter; born `Delivered`.
    Instant,
}

/// A sales order. `customer` is optional for anonymous walk-ins; ledger
/// postings only happen when a customer party is attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Order identity.
    pub id: SalesOrderId,
    /// Human-facing order number, unique. Also the ledger upsert reference
    /// for this order's sale entry.
    pub order_number: String,
    /// The customer party, if the buyer has an account.
    pub customer: Option<PartyId>,
    /// Buyer name as written on the order (kept even with a party attached).
    pub customer_name: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Lifecycle status; `Delivered` lines decrease stock.
    pub status: SalesOrderStatus,
    /// Standard or instant sale.
    pub sales_type: SalesType,
    /// Delivery charges added to the total.
    pub delivery_charges: Decimal,
    /// Transportation cost added to the total.
    pub transportation_cost: Decimal,
    /// Discount subtracted from the total.
    pub discount_amount: Decimal,
    /// Order total: line sum plus charges minus discount, recomputed on
    /// every edit. This is the amount posted to the customer ledger.
    pub total_amount: Decimal,
    /// Deposit taken with the order; posted to the ledger as a payment
    /// under reference `{order_number}-DEPOSIT`.
    pub customer_deposit: Decimal,
    /// Record creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One product line on a sales order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    /// Line identity.
    pub id: SalesOrderLineId,
    /// Parent order.
    pub order: SalesOrderId,
    /// Product sold.
    pub product: ProductId,
    /// Warehouse the goods ship from.
    pub warehouse: WarehouseId,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Unit selling price.
    pub unit_price: Decimal,
}

impl SalesOrderLine {
    /// Line subtotal.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}
