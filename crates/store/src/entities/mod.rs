//! Stored record types.
//!
//! These are the rows the `RecordStore` holds. Balances and stock levels are
//! never authoritative here; fields like `current_balance` are display caches
//! recomputed by the repositories after each write.

pub mod bank;
pub mod catalog;
pub mod loan;
pub mod party;
pub mod purchasing;
pub mod sales;

pub use bank::{BankAccount, BankLedgerEntry};
pub use catalog::{Product, Warehouse};
pub use loan::{Loan, LoanLedgerEntry};
pub use party::{Party, PartyKind, PartyLedgerEntry};
pub use purchasing::{
    GoodsReceipt, GoodsReceiptLine, PurchaseOrder, PurchaseOrderLine, PurchaseOrderStatus,
};
pub use sales::{SalesOrder, SalesOrderLine, SalesType};
