//! Sale and purchase orders: pricing, lifecycle and persistence.

mod aggregate;
mod commands;
mod events;
pub mod lifecycle;
pub mod pricing;
mod service;
mod state;
mod value_objects;

pub use aggregate::Order;
pub use commands::*;
pub use events::{
    OrderCancelledData, OrderConfirmedData, OrderDeletedData, OrderEvent, OrderPlacedData,
    OrderRevisedData,
};
pub use pricing::{PricedOrder, price_lines};
pub use service::OrderService;
pub use state::{OrderAction, OrderKind, OrderStatus};
pub use value_objects::{Counterparty, CounterpartyRef, LineItem, PricedLine};

use common::{CustomerId, ProductId};
use thiserror::Error;

/// Malformed order input: bad quantities, dangling references, missing
/// counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid quantity {quantity} for product {product_id} (must be at least 1)")]
    InvalidQuantity { product_id: ProductId, quantity: u32 },

    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error("Unknown customer: {0}")]
    UnknownCustomer(CustomerId),

    #[error("Order has no items")]
    NoItems,

    #[error("Supplier name is required")]
    SupplierRequired,

    #[error("A {kind} cannot have a {given} as counterparty")]
    CounterpartyMismatch { kind: OrderKind, given: &'static str },

    #[error("Order is a {actual}, not a {expected}")]
    KindMismatch {
        expected: OrderKind,
        actual: OrderKind,
    },

    #[error("Order amount overflows")]
    AmountOverflow,
}

/// An action was attempted on an order whose status forbids it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub struct InvalidStateError {
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub action: OrderAction,
}

impl std::fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot {} a {} {}",
            self.action.verb(self.kind),
            self.status,
            self.kind
        )
    }
}

/// Errors returned by order commands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),

    #[error("Order already created")]
    AlreadyCreated,

    /// The order was never placed or has been deleted.
    #[error("Order not found")]
    NotFound,
}
