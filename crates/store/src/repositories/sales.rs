//! Sales repository: orders, deliveries, and the ledger postings they drive.
//!
//! Delivery is the inventory event: a sales order's lines decrease stock
//! only while the order is `Delivered`. Instant sales are born delivered.
//! When the order has a customer party, saving the order upserts a `Sale`
//! ledger entry keyed on the order number, and a deposit upserts a `Payment`
//! entry keyed on `{order_number}-DEPOSIT`, so editing an order re-posts
//! instead of double-posting.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use stockbook_core::inventory::{InventoryService, SalesOrderStatus};
use stockbook_core::party::PartyEntryKind;
use stockbook_shared::types::{PartyId, ProductId, SalesOrderId, SalesOrderLineId, WarehouseId};

use crate::entities::{PartyKind, SalesOrder, SalesOrderLine, SalesType};
use crate::repositories::party::{NewPartyEntry, PartyError, PartyRepository};
use crate::store::{RecordError, RecordStore};

/// Error types for sales operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SalesError {
    /// Customer party not found.
    #[error("Customer not found: {0}")]
    CustomerNotFound(PartyId),

    /// The party exists but is not a customer.
    #[error("Party {0} is not a customer")]
    NotACustomer(PartyId),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Product exists but is inactive.
    #[error("Product {0} is inactive")]
    ProductInactive(ProductId),

    /// Warehouse not found.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// Sales order not found.
    #[error("Sales order not found: {0}")]
    OrderNotFound(SalesOrderId),

    /// An order needs at least one line.
    #[error("Sales order must have at least one line")]
    EmptyOrder,

    /// Quantities must be positive.
    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    /// Prices must not be negative.
    #[error("Unit price must not be negative, got {0}")]
    NegativeUnitPrice(Decimal),

    /// Deposits must not be negative.
    #[error("Customer deposit must not be negative, got {0}")]
    NegativeDeposit(Decimal),

    /// Charges and discounts must not be negative.
    #[error("{name} must not be negative, got {amount}")]
    NegativeCharge {
        /// Which charge field was negative.
        name: &'static str,
        /// The offending amount.
        amount: Decimal,
    },

    /// Delivery would take more stock than the warehouse holds.
    #[error(
        "Insufficient stock for product {product} in warehouse {warehouse}: \
         requested {requested}, available {available}"
    )]
    InsufficientStock {
        /// The product.
        product: ProductId,
        /// The warehouse being shipped from.
        warehouse: WarehouseId,
        /// Quantity the order needs.
        requested: Decimal,
        /// Derived on-hand quantity.
        available: Decimal,
    },

    /// The operation needs an undelivered, uncancelled order.
    #[error("Sales order {order} is {status:?}")]
    WrongStatus {
        /// The order.
        order: SalesOrderId,
        /// Its actual status.
        status: SalesOrderStatus,
    },

    /// Ledger posting failure.
    #[error(transparent)]
    Ledger(#[from] PartyError),

    /// Structural store failure.
    #[error(transparent)]
    Record(#[from] RecordError),
}

/// Input for one sales order line.
#[derive(Debug, Clone)]
pub struct NewSalesLine {
    /// Product sold.
    pub product: ProductId,
    /// Warehouse the goods ship from.
    pub warehouse: WarehouseId,
    /// Quantity sold.
    pub quantity: Decimal,
    /// Unit selling price.
    pub unit_price: Decimal,
}

/// Input for creating a sales order.
#[derive(Debug, Clone)]
pub struct NewSalesOrder {
    /// The customer party, if the buyer has an account.
    pub customer: Option<PartyId>,
    /// Buyer name as written on the order.
    pub customer_name: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Standard or instant sale.
    pub sales_type: SalesType,
    /// Delivery charges added to the total.
    pub delivery_charges: Decimal,
    /// Transportation cost added to the total.
    pub transportation_cost: Decimal,
    /// Discount subtracted from the total.
    pub discount_amount: Decimal,
    /// Deposit taken with the order.
    pub customer_deposit: Decimal,
    /// Order lines.
    pub lines: Vec<NewSalesLine>,
}

/// Sales repository.
pub struct SalesRepository;

impl SalesRepository {
    /// Creates a sales order.
    ///
    /// A standard order starts in `Order` and leaves stock untouched. An
    /// instant sale is availability-checked here and born `Delivered`.
    pub fn create_order(
        store: &mut RecordStore,
        input: NewSalesOrder,
    ) -> Result<SalesOrderId, SalesError> {
        if let Some(customer) = input.customer {
            let party = store
                .party(customer)
                .ok_or(SalesError::CustomerNotFound(customer))?;
            if party.kind != PartyKind::Customer {
                return Err(SalesError::NotACustomer(customer));
            }
        }
        if input.customer_deposit < Decimal::ZERO {
            return Err(SalesError::NegativeDeposit(input.customer_deposit));
        }
        for (name, amount) in [
            ("Delivery charges", input.delivery_charges),
            ("Transportation cost", input.transportation_cost),
            ("Discount", input.discount_amount),
        ] {
            if amount < Decimal::ZERO {
                return Err(SalesError::NegativeCharge { name, amount });
            }
        }
        Self::validate_lines(store, &input.lines)?;
        if input.sales_type == SalesType::Instant {
            Self::check_availability(store, &input.lines)?;
        }

        let line_total: Decimal = input
            .lines
            .iter()
            .map(|line| line.quantity * line.unit_price)
            .sum();
        let total_amount = line_total + input.delivery_charges + input.transportation_cost
            - input.discount_amount;
        let status = match input.sales_type {
            SalesType::Instant => SalesOrderStatus::Delivered,
            SalesType::Standard => SalesOrderStatus::Order,
        };

        let id = SalesOrderId::new();
        let order_number = RecordStore::document_number("SO", id.into_inner());
        store.sales_orders.insert(
            id,
            SalesOrder {
                id,
                order_number: order_number.clone(),
                customer: input.customer,
                customer_name: input.customer_name,
                order_date: input.order_date,
                status,
                sales_type: input.sales_type,
                delivery_charges: input.delivery_charges,
                transportation_cost: input.transportation_cost,
                discount_amount: input.discount_amount,
                total_amount,
                customer_deposit: input.customer_deposit,
                created_at: Utc::now(),
            },
        );
        for line in input.lines {
            store.sales_order_lines.push(SalesOrderLine {
                id: SalesOrderLineId::new(),
                order: id,
                product: line.product,
                warehouse: line.warehouse,
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }

        if let Some(customer) = input.customer {
            Self::post_order_ledger(
                store,
                customer,
                &order_number,
                total_amount,
                input.customer_deposit,
                input.order_date,
            )?;
        }
        Ok(id)
    }

    /// Delivers a standard order: availability-checks every line, then
    /// flips the status so the lines start decreasing stock.
    pub fn deliver_order(store: &mut RecordStore, order: SalesOrderId) -> Result<(), SalesError> {
        let record = store
            .sales_order(order)
            .ok_or(SalesError::OrderNotFound(order))?;
        if record.status != SalesOrderStatus::Order {
            return Err(SalesError::WrongStatus {
                order,
                status: record.status,
            });
        }
        let lines: Vec<NewSalesLine> = store
            .sales_order_lines(order)
            .map(|line| NewSalesLine {
                product: line.product,
                warehouse: line.warehouse,
                quantity: line.quantity,
                unit_price: line.unit_price,
            })
            .collect();
        Self::check_availability(store, &lines)?;
        if let Some(record) = store.sales_orders.get_mut(&order) {
            record.status = SalesOrderStatus::Delivered;
        }
        Ok(())
    }

    /// Cancels an order. A delivered order's stock contribution reverses by
    /// status filter; its `Sale` ledger entry stays on the books and needs a
    /// manual return or adjustment if the money side should reverse too.
    pub fn cancel_order(store: &mut RecordStore, order: SalesOrderId) -> Result<(), SalesError> {
        let record = store
            .sales_orders
            .get_mut(&order)
            .ok_or(SalesError::OrderNotFound(order))?;
        if record.status == SalesOrderStatus::Cancelled {
            return Err(SalesError::WrongStatus {
                order,
                status: record.status,
            });
        }
        record.status = SalesOrderStatus::Cancelled;
        Ok(())
    }

    /// Replaces an undelivered order's lines, recomputes the total, and
    /// re-posts the `Sale` ledger entry in place.
    pub fn replace_order_lines(
        store: &mut RecordStore,
        order: SalesOrderId,
        lines: Vec<NewSalesLine>,
    ) -> Result<(), SalesError> {
        let record = store
            .sales_order(order)
            .ok_or(SalesError::OrderNotFound(order))?;
        if record.status != SalesOrderStatus::Order {
            return Err(SalesError::WrongStatus {
                order,
                status: record.status,
            });
        }
        Self::validate_lines(store, &lines)?;

        let customer = record.customer;
        let order_number = record.order_number.clone();
        let order_date = record.order_date;
        let deposit = record.customer_deposit;
        let line_total: Decimal = lines
            .iter()
            .map(|line| line.quantity * line.unit_price)
            .sum();
        let total_amount = line_total + record.delivery_charges + record.transportation_cost
            - record.discount_amount;

        store.sales_order_lines.retain(|line| line.order != order);
        for line in lines {
            store.sales_order_lines.push(SalesOrderLine {
                id: SalesOrderLineId::new(),
                order,
                product: line.product,
                warehouse: line.warehouse,
                quantity: line.quantity,
                unit_price: line.unit_price,
            });
        }
        if let Some(record) = store.sales_orders.get_mut(&order) {
            record.total_amount = total_amount;
        }

        if let Some(customer) = customer {
            Self::post_order_ledger(
                store,
                customer,
                &order_number,
                total_amount,
                deposit,
                order_date,
            )?;
        }
        Ok(())
    }

    fn validate_lines(store: &RecordStore, lines: &[NewSalesLine]) -> Result<(), SalesError> {
        if lines.is_empty() {
            return Err(SalesError::EmptyOrder);
        }
        for line in lines {
            let product = store
                .product(line.product)
                .ok_or(SalesError::ProductNotFound(line.product))?;
            if !product.is_active {
                return Err(SalesError::ProductInactive(line.product));
            }
            if store.warehouse(line.warehouse).is_none() {
                return Err(SalesError::WarehouseNotFound(line.warehouse));
            }
            if line.quantity <= Decimal::ZERO {
                return Err(SalesError::NonPositiveQuantity(line.quantity));
            }
            if line.unit_price < Decimal::ZERO {
                return Err(SalesError::NegativeUnitPrice(line.unit_price));
            }
        }
        Ok(())
    }

    /// Checks that each (product, warehouse) pair has enough derived stock
    /// for the aggregate quantity across the given lines.
    fn check_availability(store: &RecordStore, lines: &[NewSalesLine]) -> Result<(), SalesError> {
        let receipt_lines = store.receipt_line_views()?;
        let sales_lines = store.sales_line_views()?;

        let mut requested: Vec<(ProductId, WarehouseId, Decimal)> = Vec::new();
        for line in lines {
            match requested
                .iter_mut()
                .find(|(p, w, _)| *p == line.product && *w == line.warehouse)
            {
                Some((_, _, total)) => *total += line.quantity,
                None => requested.push((line.product, line.warehouse, line.quantity)),
            }
        }
        for (product, warehouse, total) in requested {
            let available = InventoryService::on_hand_quantity(
                product,
                Some(warehouse),
                &receipt_lines,
                &sales_lines,
            );
            if total > available {
                return Err(SalesError::InsufficientStock {
                    product,
                    warehouse,
                    requested: total,
                    available,
                });
            }
        }
        Ok(())
    }

    /// Upserts the order's ledger entries: the sale keyed on the order
    /// number, and the deposit (when positive) keyed on
    /// `{order_number}-DEPOSIT`.
    fn post_order_ledger(
        store: &mut RecordStore,
        customer: PartyId,
        order_number: &str,
        total_amount: Decimal,
        deposit: Decimal,
        order_date: NaiveDate,
    ) -> Result<(), SalesError> {
        PartyRepository::upsert_entry(
            store,
            customer,
            NewPartyEntry {
                kind: PartyEntryKind::Sale,
                amount: total_amount,
                transaction_date: order_date,
                reference: Some(order_number.to_owned()),
                description: format!("Sales order {order_number}"),
            },
        )?;
        if deposit > Decimal::ZERO {
            PartyRepository::upsert_entry(
                store,
                customer,
                NewPartyEntry {
                    kind: PartyEntryKind::Payment,
                    amount: deposit,
                    transaction_date: order_date,
                    reference: Some(format!("{order_number}-DEPOSIT")),
                    description: format!("Deposit for sales order {order_number}"),
                },
            )?;
        }
        Ok(())
    }
}
