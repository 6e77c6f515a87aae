//! Order commands.

use common::{AggregateId, CustomerId};

use crate::command::Command;

use super::{CounterpartyRef, LineItem, Order, OrderKind};

/// Place a new sale or purchase.
#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub order_id: AggregateId,
    pub kind: OrderKind,
    pub counterparty: CounterpartyRef,
    pub items: Vec<LineItem>,
}

impl PlaceOrder {
    /// A sale to an existing customer, with a generated order ID.
    pub fn sale(customer_id: CustomerId, items: Vec<LineItem>) -> Self {
        Self {
            order_id: AggregateId::new(),
            kind: OrderKind::Sale,
            counterparty: CounterpartyRef::Customer(customer_id),
            items,
        }
    }

    /// A purchase from a named supplier, with a generated order ID.
    pub fn purchase(supplier: impl Into<String>, items: Vec<LineItem>) -> Self {
        Self {
            order_id: AggregateId::new(),
            kind: OrderKind::Purchase,
            counterparty: CounterpartyRef::Supplier(supplier.into()),
            items,
        }
    }
}

/// Replace the counterparty and items of a Pending order.
#[derive(Debug, Clone)]
pub struct EditOrder {
    pub order_id: AggregateId,
    pub counterparty: CounterpartyRef,
    pub items: Vec<LineItem>,
}

impl EditOrder {
    pub fn new(order_id: AggregateId, counterparty: CounterpartyRef, items: Vec<LineItem>) -> Self {
        Self {
            order_id,
            counterparty,
            items,
        }
    }
}

/// Confirm a Pending order, optionally insisting on its kind.
#[derive(Debug, Clone)]
pub struct ConfirmOrder {
    pub order_id: AggregateId,
    pub expected_kind: Option<OrderKind>,
}

impl ConfirmOrder {
    pub fn new(order_id: AggregateId) -> Self {
        Self {
            order_id,
            expected_kind: None,
        }
    }

    /// "Sell": confirm, but only if the order is a sale.
    pub fn sell(order_id: AggregateId) -> Self {
        Self {
            order_id,
            expected_kind: Some(OrderKind::Sale),
        }
    }

    /// "Received": confirm, but only if the order is a purchase.
    pub fn receive(order_id: AggregateId) -> Self {
        Self {
            order_id,
            expected_kind: Some(OrderKind::Purchase),
        }
    }
}

/// Cancel a Pending sale.
#[derive(Debug, Clone)]
pub struct CancelOrder {
    pub order_id: AggregateId,
    pub reason: Option<String>,
}

impl CancelOrder {
    pub fn new(order_id: AggregateId, reason: Option<String>) -> Self {
        Self { order_id, reason }
    }
}

/// Delete a Pending order.
#[derive(Debug, Clone)]
pub struct DeleteOrder {
    pub order_id: AggregateId,
}

impl DeleteOrder {
    pub fn new(order_id: AggregateId) -> Self {
        Self { order_id }
    }
}

macro_rules! order_command {
    ($($command:ty),+ $(,)?) => {
        $(
            impl Command for $command {
                type Aggregate = Order;

                fn aggregate_id(&self) -> AggregateId {
                    self.order_id
                }
            }
        )+
    };
}

order_command!(PlaceOrder, EditOrder, ConfirmOrder, CancelOrder, DeleteOrder);
