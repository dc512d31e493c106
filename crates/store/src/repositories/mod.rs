//! Command and query layer over the record store.
//!
//! Each repository is a stateless struct of associated functions: reads take
//! `&RecordStore`, commands take `&mut RecordStore` and validate everything
//! before the first mutation. Derived numbers always come from the engines
//! in `stockbook-core`; cached fields on records are refreshed here, never
//! trusted.

pub mod bank;
pub mod catalog;
pub mod inventory;
pub mod loan;
pub mod party;
pub mod purchasing;
pub mod sales;

pub use bank::{BankError, BankRepository, NewBankAccount};
pub use catalog::{CatalogError, CatalogRepository, NewProduct};
pub use inventory::{InventoryError, InventoryRepository, StockOverviewRow};
pub use loan::{LoanError, LoanRepository, NewLoan};
pub use party::{NewPartyEntry, OPENING_BALANCE_REFERENCE, PartyError, PartyRepository};
pub use purchasing::{
    NewGoodsReceipt, NewGoodsReceiptLine, NewPurchaseOrder, NewPurchaseOrderLine, OrderFulfillment,
    PurchasingError, PurchasingRepository,
};
pub use sales::{NewSalesLine, NewSalesOrder, SalesError, SalesRepository};
