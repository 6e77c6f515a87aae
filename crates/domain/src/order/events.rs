//! Order domain events.

use chrono::{DateTime, Utc};
use common::AggregateId;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::aggregate::DomainEvent;

use super::{Counterparty, OrderKind, PricedLine, PricedOrder};

/// Events that can occur on an order aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderEvent {
    OrderPlaced(OrderPlacedData),
    OrderRevised(OrderRevisedData),
    OrderConfirmed(OrderConfirmedData),
    OrderCancelled(OrderCancelledData),
    OrderDeleted(OrderDeletedData),
}

impl DomainEvent for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderPlaced(_) => "OrderPlaced",
            OrderEvent::OrderRevised(_) => "OrderRevised",
            OrderEvent::OrderConfirmed(_) => "OrderConfirmed",
            OrderEvent::OrderCancelled(_) => "OrderCancelled",
            OrderEvent::OrderDeleted(_) => "OrderDeleted",
        }
    }
}

/// A new Pending order was placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlacedData {
    pub order_id: AggregateId,
    pub kind: OrderKind,
    pub counterparty: Counterparty,
    pub lines: Vec<PricedLine>,
    pub total_amount: Money,
    pub placed_at: DateTime<Utc>,
}

/// Counterparty and items of a Pending order were replaced and repriced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRevisedData {
    pub counterparty: Counterparty,
    pub lines: Vec<PricedLine>,
    pub total_amount: Money,
    pub revised_at: DateTime<Utc>,
}

/// The sale was sold or the purchase was received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmedData {
    pub confirmed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancelledData {
    pub reason: Option<String>,
    pub cancelled_at: DateTime<Utc>,
}

/// Tombstone: the Pending order was withdrawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeletedData {
    pub deleted_at: DateTime<Utc>,
}

impl OrderEvent {
    pub fn order_placed(
        order_id: AggregateId,
        kind: OrderKind,
        counterparty: Counterparty,
        priced: PricedOrder,
    ) -> Self {
        OrderEvent::OrderPlaced(OrderPlacedData {
            order_id,
            kind,
            counterparty,
            lines: priced.lines,
            total_amount: priced.total,
            placed_at: Utc::now(),
        })
    }

    pub fn order_revised(counterparty: Counterparty, priced: PricedOrder) -> Self {
        OrderEvent::OrderRevised(OrderRevisedData {
            counterparty,
            lines: priced.lines,
            total_amount: priced.total,
            revised_at: Utc::now(),
        })
    }

    pub fn order_confirmed() -> Self {
        OrderEvent::OrderConfirmed(OrderConfirmedData {
            confirmed_at: Utc::now(),
        })
    }

    pub fn order_cancelled(reason: Option<String>) -> Self {
        OrderEvent::OrderCancelled(OrderCancelledData {
            reason,
            cancelled_at: Utc::now(),
        })
    }

    pub fn order_deleted() -> Self {
        OrderEvent::OrderDeleted(OrderDeletedData {
            deleted_at: Utc::now(),
        })
    }

    /// When the event happened.
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrderEvent::OrderPlaced(data) => data.placed_at,
            OrderEvent::OrderRevised(data) => data.revised_at,
            OrderEvent::OrderConfirmed(data) => data.confirmed_at,
            OrderEvent::OrderCancelled(data) => data.cancelled_at,
            OrderEvent::OrderDeleted(data) => data.deleted_at,
        }
    }
}
