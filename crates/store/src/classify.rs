//! Classification of repository errors into the application-wide
//! [`AppError`] categories.
//!
//! Callers that do not care which repository failed (report runners, outer
//! surfaces) convert here and branch on `error_code()` instead of matching
//! seven enums.

use stockbook_shared::AppError;

use crate::repositories::{
    BankError, CatalogError, InventoryError, LoanError, PartyError, PurchasingError, SalesError,
};
use crate::store::RecordError;

impl From<RecordError> for AppError {
    fn from(error: RecordError) -> Self {
        Self::Consistency(error.to_string())
    }
}

impl From<InventoryError> for AppError {
    fn from(error: InventoryError) -> Self {
        match error {
            InventoryError::ProductNotFound(_) | InventoryError::WarehouseNotFound(_) => {
                Self::NotFound(error.to_string())
            }
            InventoryError::Record(record) => record.into(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::ProductNotFound(_) | CatalogError::WarehouseNotFound(_) => {
                Self::NotFound(error.to_string())
            }
            CatalogError::DuplicateSku(_) => Self::Conflict(error.to_string()),
            CatalogError::EmptyName | CatalogError::NegativePrice(_) => {
                Self::Validation(error.to_string())
            }
        }
    }
}

impl From<PartyError> for AppError {
    fn from(error: PartyError) -> Self {
        match error {
            PartyError::PartyNotFound(_) => Self::NotFound(error.to_string()),
            PartyError::EmptyName | PartyError::Ledger(_) => Self::Validation(error.to_string()),
        }
    }
}

impl From<PurchasingError> for AppError {
    fn from(error: PurchasingError) -> Self {
        match error {
            PurchasingError::SupplierNotFound(_)
            | PurchasingError::ProductNotFound(_)
            | PurchasingError::WarehouseNotFound(_)
            | PurchasingError::OrderNotFound(_)
            | PurchasingError::OrderLineNotFound(_)
            | PurchasingError::ReceiptNotFound(_) => Self::NotFound(error.to_string()),
            PurchasingError::NotASupplier(_)
            | PurchasingError::ProductInactive(_)
            | PurchasingError::EmptyOrder
            | PurchasingError::EmptyReceipt
            | PurchasingError::NonPositiveQuantity(_)
            | PurchasingError::NegativeUnitCost(_) => Self::Validation(error.to_string()),
            PurchasingError::OrderCancelled(_)
            | PurchasingError::QuantityExceedsRemaining { .. }
            | PurchasingError::NotADraft { .. }
            | PurchasingError::ReceiptAlreadyCancelled(_)
            | PurchasingError::HasLiveReceipts(_) => Self::BusinessRule(error.to_string()),
            PurchasingError::LineOrderMismatch { .. } => Self::Consistency(error.to_string()),
            PurchasingError::Record(record) => record.into(),
        }
    }
}

impl From<SalesError> for AppError {
    fn from(error: SalesError) -> Self {
        match error {
            SalesError::CustomerNotFound(_)
            | SalesError::ProductNotFound(_)
            | SalesError::WarehouseNotFound(_)
            | SalesError::OrderNotFound(_) => Self::NotFound(error.to_string()),
            SalesError::NotACustomer(_)
            | SalesError::ProductInactive(_)
            | SalesError::EmptyOrder
            | SalesError::NonPositiveQuantity(_)
            | SalesError::NegativeUnitPrice(_)
            | SalesError::NegativeDeposit(_)
            | SalesError::NegativeCharge { .. }
            | SalesError::Ledger(_) => Self::Validation(error.to_string()),
            SalesError::InsufficientStock { .. } | SalesError::WrongStatus { .. } => {
                Self::BusinessRule(error.to_string())
            }
            SalesError::Record(record) => record.into(),
        }
    }
}

impl From<LoanError> for AppError {
    fn from(error: LoanError) -> Self {
        match error {
            LoanError::LoanNotFound(_) => Self::NotFound(error.to_string()),
            LoanError::DuplicateDealNumber(_) => Self::Conflict(error.to_string()),
            LoanError::NonPositivePrincipal(_) | LoanError::NonPositiveAmount(_) => {
                Self::Validation(error.to_string())
            }
        }
    }
}

impl From<BankError> for AppError {
    fn from(error: BankError) -> Self {
        match error {
            BankError::AccountNotFound(_) => Self::NotFound(error.to_string()),
            BankError::NonPositiveAmount(_) => Self::Validation(error.to_string()),
        }
    }
}
