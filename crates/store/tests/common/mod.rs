//! Shared fixtures for store integration tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stockbook_shared::types::{PartyId, ProductId, PurchaseOrderId, WarehouseId};
use stockbook_store::RecordStore;
use stockbook_store::repositories::{
    CatalogRepository, NewGoodsReceipt, NewGoodsReceiptLine, NewProduct, NewPurchaseOrder,
    NewPurchaseOrderLine, PartyRepository, PurchasingRepository,
};

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
}

/// Installs a test subscriber so repository tracing shows up under
/// `--nocapture`. Idempotent across tests in one binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A store seeded with one product, one warehouse, one supplier, and one
/// customer.
pub struct Fixture {
    pub store: RecordStore,
    pub product: ProductId,
    pub warehouse: WarehouseId,
    pub supplier: PartyId,
    pub customer: PartyId,
}

pub fn fixture() -> Fixture {
    init_tracing();
    let mut store = RecordStore::new();
    let product = CatalogRepository::create_product(
        &mut store,
        NewProduct {
            name: "Glazed tile 60x60".to_owned(),
            sku: "TILE-6060".to_owned(),
            unit_code: "pcs".to_owned(),
            cost_price: dec!(8),
            selling_price: dec!(12),
            pcs_per_carton: 4,
            sqft_per_pcs: dec!(3.88),
            min_stock_level: Decimal::ZERO,
        },
    )
    .unwrap();
    let warehouse = CatalogRepository::create_warehouse(&mut store, "Main", "Karachi").unwrap();
    let supplier =
        PartyRepository::create_supplier(&mut store, "Crown Ceramics", "0300-0000000", "").unwrap();
    let customer =
        PartyRepository::create_customer(&mut store, "Builder One", "0301-0000000", "").unwrap();
    Fixture {
        store,
        product,
        warehouse,
        supplier,
        customer,
    }
}

/// Orders and confirms a receipt of `quantity` units at `unit_cost` into the
/// fixture warehouse, returning the purchase order.
pub fn receive_stock(
    fx: &mut Fixture,
    quantity: Decimal,
    unit_cost: Decimal,
    receipt_date: NaiveDate,
) -> PurchaseOrderId {
    let order = PurchasingRepository::create_order(
        &mut fx.store,
        NewPurchaseOrder {
            supplier: fx.supplier,
            order_date: receipt_date,
            expected_date: None,
            lines: vec![NewPurchaseOrderLine {
                product: fx.product,
                quantity,
                unit_cost,
            }],
        },
    )
    .unwrap();
    let order_line = fx.store.purchase_order_lines(order).next().unwrap().id;
    let receipt = PurchasingRepository::create_receipt(
        &mut fx.store,
        NewGoodsReceipt {
            order,
            receipt_date,
            lines: vec![NewGoodsReceiptLine {
                order_line,
                warehouse: Some(fx.warehouse),
                quantity,
            }],
        },
    )
    .unwrap();
    PurchasingRepository::confirm_receipt(&mut fx.store, receipt).unwrap();
    order
}
