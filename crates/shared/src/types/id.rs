//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `ProductId` where a
//! `WarehouseId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(ProductId, "Unique identifier for a product.");
typed_id!(WarehouseId, "Unique identifier for a warehouse.");
typed_id!(PurchaseOrderId, "Unique identifier for a purchase order.");
typed_id!(
    PurchaseOrderLineId,
    "Unique identifier for a purchase order line."
);
typed_id!(GoodsReceiptId, "Unique identifier for a goods receipt.");
typed_id!(
    GoodsReceiptLineId,
    "Unique identifier for a goods receipt line."
);
typed_id!(SalesOrderId, "Unique identifier for a sales order.");
typed_id!(SalesOrderLineId, "Unique identifier for a sales order line.");
typed_id!(PartyId, "Unique identifier for a customer or supplier.");
typed_id!(
    LedgerEntryId,
    "Unique identifier for a customer/supplier ledger entry."
);
typed_id!(LoanId, "Unique identifier for a credit card loan.");
typed_id!(LoanEntryId, "Unique identifier for a loan ledger entry.");
typed_id!(BankAccountId, "Unique identifier for a bank account.");
typed_id!(
    BankEntryId,
    "Unique identifier for a bank account ledger entry."
);
