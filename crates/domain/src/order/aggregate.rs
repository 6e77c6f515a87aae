//! Order aggregate implementation.

use chrono::{DateTime, Utc};
use common::AggregateId;
use event_store::Version;
use serde::{Deserialize, Serialize};

use crate::Money;
use crate::aggregate::Aggregate;
use crate::catalog::{CustomerLookup, ProductLookup};

use super::events::{OrderPlacedData, OrderRevisedData};
use super::{
    Counterparty, CounterpartyRef, LineItem, OrderAction, OrderError, OrderEvent, OrderKind,
    OrderStatus, PricedLine, PricedOrder, ValidationError, lifecycle, price_lines,
};

/// Order aggregate root: one sale or one purchase.
///
/// The total always equals the sum of the priced lines; it is only ever
/// set together with them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Order {
    id: Option<AggregateId>,

    #[serde(default)]
    version: Version,

    kind: OrderKind,

    counterparty: Option<Counterparty>,

    lines: Vec<PricedLine>,

    total_amount: Money,

    status: OrderStatus,

    cancellation_reason: Option<String>,

    created_at: Option<DateTime<Utc>>,

    updated_at: Option<DateTime<Utc>>,

    deleted: bool,
}

impl Aggregate for Order {
    type Event = OrderEvent;
    type Error = OrderError;

    fn aggregate_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> Option<AggregateId> {
        self.id
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    fn apply(&mut self, event: Self::Event) {
        self.updated_at = Some(event.occurred_at());
        match event {
            OrderEvent::OrderPlaced(data) => self.apply_order_placed(data),
            OrderEvent::OrderRevised(data) => self.apply_order_revised(data),
            OrderEvent::OrderConfirmed(_) => {
                self.status = OrderStatus::Confirmed;
            }
            OrderEvent::OrderCancelled(data) => {
                self.status = OrderStatus::Cancelled;
                self.cancellation_reason = data.reason;
            }
            OrderEvent::OrderDeleted(_) => {
                self.deleted = true;
            }
        }
    }
}

// Query methods
impl Order {
    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn counterparty(&self) -> Option<&Counterparty> {
        self.counterparty.as_ref()
    }

    pub fn lines(&self) -> &[PricedLine] {
        &self.lines
    }

    pub fn line_totals(&self) -> Vec<Money> {
        self.lines.iter().map(|line| line.line_total).collect()
    }

    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Actions the lifecycle currently allows on this order.
    pub fn available_actions(&self) -> Vec<OrderAction> {
        if self.is_live() {
            lifecycle::available_actions(self.kind, self.status)
        } else {
            Vec::new()
        }
    }

    fn is_live(&self) -> bool {
        self.id.is_some() && !self.deleted
    }
}

// Command methods (return events)
impl Order {
    /// Places a new Pending order.
    pub fn place<C>(
        &self,
        order_id: AggregateId,
        kind: OrderKind,
        counterparty: CounterpartyRef,
        items: &[LineItem],
        catalog: &C,
    ) -> Result<Vec<OrderEvent>, OrderError>
    where
        C: ProductLookup + CustomerLookup + ?Sized,
    {
        if self.id.is_some() {
            return Err(OrderError::AlreadyCreated);
        }

        let (counterparty, priced) = Self::price(kind, counterparty, items, catalog)?;
        Ok(vec![OrderEvent::order_placed(
            order_id,
            kind,
            counterparty,
            priced,
        )])
    }

    /// Replaces counterparty and items and reprices at current prices.
    pub fn edit<C>(
        &self,
        counterparty: CounterpartyRef,
        items: &[LineItem],
        catalog: &C,
    ) -> Result<Vec<OrderEvent>, OrderError>
    where
        C: ProductLookup + CustomerLookup + ?Sized,
    {
        self.authorize(OrderAction::Edit)?;

        let (counterparty, priced) = Self::price(self.kind, counterparty, items, catalog)?;
        Ok(vec![OrderEvent::order_revised(counterparty, priced)])
    }

    /// Moves a Pending order to Confirmed.
    pub fn confirm(&self) -> Result<Vec<OrderEvent>, OrderError> {
        self.authorize(OrderAction::Confirm)?;
        Ok(vec![OrderEvent::order_confirmed()])
    }

    /// Like [`Order::confirm`], but first checks the order is of `kind`, so a
    /// "sell" can never receive a purchase and vice versa.
    pub fn confirm_as(&self, kind: OrderKind) -> Result<Vec<OrderEvent>, OrderError> {
        if !self.is_live() {
            return Err(OrderError::NotFound);
        }
        if self.kind != kind {
            return Err(ValidationError::KindMismatch {
                expected: kind,
                actual: self.kind,
            }
            .into());
        }
        self.confirm()
    }

    /// Moves a Pending sale to Cancelled.
    pub fn cancel(&self, reason: Option<String>) -> Result<Vec<OrderEvent>, OrderError> {
        self.authorize(OrderAction::Cancel)?;
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());
        Ok(vec![OrderEvent::order_cancelled(reason)])
    }

    /// Withdraws a Pending order.
    pub fn delete(&self) -> Result<Vec<OrderEvent>, OrderError> {
        self.authorize(OrderAction::Delete)?;
        Ok(vec![OrderEvent::order_deleted()])
    }

    fn authorize(&self, action: OrderAction) -> Result<(), OrderError> {
        if !self.is_live() {
            return Err(OrderError::NotFound);
        }
        lifecycle::authorize(self.kind, self.status, action)?;
        Ok(())
    }

    fn price<C>(
        kind: OrderKind,
        counterparty: CounterpartyRef,
        items: &[LineItem],
        catalog: &C,
    ) -> Result<(Counterparty, PricedOrder), ValidationError>
    where
        C: ProductLookup + CustomerLookup + ?Sized,
    {
        let counterparty = counterparty.resolve(kind, catalog)?;
        if items.is_empty() {
            return Err(ValidationError::NoItems);
        }
        let priced = price_lines(items, catalog)?;
        Ok((counterparty, priced))
    }
}

// Apply event helpers
impl Order {
    fn apply_order_placed(&mut self, data: OrderPlacedData) {
        self.id = Some(data.order_id);
        self.kind = data.kind;
        self.counterparty = Some(data.counterparty);
        self.lines = data.lines;
        self.total_amount = data.total_amount;
        self.status = OrderStatus::Pending;
        self.created_at = Some(data.placed_at);
    }

    fn apply_order_revised(&mut self, data: OrderRevisedData) {
        self.counterparty = Some(data.counterparty);
        self.lines = data.lines;
        self.total_amount = data.total_amount;
    }
}

#[cfg(test)]
mod tests {
    use common::{CustomerId, ProductId};

    use super::*;
    use crate::catalog::{Catalog, NewCustomer, NewProduct};
    use crate::order::InvalidStateError;

    struct Fixture {
        catalog: Catalog,
        widget: ProductId,
        gadget: ProductId,
        alice: CustomerId,
    }

    fn fixture() -> Fixture {
        let mut catalog = Catalog::new();
        let widget = catalog
            .add_product(new_product("Widget", "W-1", Money::from_units(50)))
            .unwrap()
            .id();
        let gadget = catalog
            .add_product(new_product("Gadget", "G-1", Money::from_units(30)))
            .unwrap()
            .id();
        let alice = catalog
            .add_customer(NewCustomer {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: "555-0100".to_string(),
                address: "1 Main St".to_string(),
            })
            .unwrap()
            .id();
        Fixture {
            catalog,
            widget,
            gadget,
            alice,
        }
    }

    fn new_product(name: &str, sku: &str, price: Money) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            sku: sku.to_string(),
            category: "General".to_string(),
            description: name.to_string(),
            quantity_available: 10,
            unit_price: price,
        }
    }

    fn place_sale(f: &Fixture) -> Order {
        let mut order = Order::default();
        let events = order
            .place(
                AggregateId::new(),
                OrderKind::Sale,
                CounterpartyRef::Customer(f.alice),
                &[LineItem::new(f.widget, 2), LineItem::new(f.gadget, 1)],
                &f.catalog,
            )
            .unwrap();
        order.apply_events(events);
        order
    }

    fn place_purchase(f: &Fixture) -> Order {
        let mut order = Order::default();
        let events = order
            .place(
                AggregateId::new(),
                OrderKind::Purchase,
                CounterpartyRef::Supplier("Acme Supply".to_string()),
                &[LineItem::new(f.widget, 4)],
                &f.catalog,
            )
            .unwrap();
        order.apply_events(events);
        order
    }

    fn snapshot(order: &Order) -> String {
        serde_json::to_string(order).unwrap()
    }

    #[test]
    fn test_place_sale() {
        let f = fixture();
        let order = place_sale(&f);

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.kind(), OrderKind::Sale);
        assert_eq!(order.counterparty().unwrap().name(), "Alice");
        assert_eq!(
            order.line_totals(),
            vec![Money::from_units(100), Money::from_units(30)]
        );
        assert_eq!(order.total_amount(), Money::from_units(130));
        assert_eq!(order.total_quantity(), 3);
        assert!(order.created_at().is_some());
    }

    #[test]
    fn test_place_twice_fails() {
        let f = fixture();
        let order = place_sale(&f);
        let result = order.place(
            AggregateId::new(),
            OrderKind::Sale,
            CounterpartyRef::Customer(f.alice),
            &[LineItem::new(f.widget, 1)],
            &f.catalog,
        );
        assert_eq!(result, Err(OrderError::AlreadyCreated));
    }

    #[test]
    fn test_place_without_items_fails() {
        let f = fixture();
        let result = Order::default().place(
            AggregateId::new(),
            OrderKind::Sale,
            CounterpartyRef::Customer(f.alice),
            &[],
            &f.catalog,
        );
        assert_eq!(result, Err(ValidationError::NoItems.into()));
    }

    #[test]
    fn test_place_with_unknown_product_fails() {
        let f = fixture();
        let missing = ProductId::new();
        let result = Order::default().place(
            AggregateId::new(),
            OrderKind::Purchase,
            CounterpartyRef::Supplier("Acme".to_string()),
            &[LineItem::new(missing, 1)],
            &f.catalog,
        );
        assert_eq!(result, Err(ValidationError::UnknownProduct(missing).into()));
    }

    #[test]
    fn test_edit_reprices_pending_order() {
        let f = fixture();
        let mut order = place_sale(&f);
        let created_at = order.created_at();

        let events = order
            .edit(
                CounterpartyRef::Customer(f.alice),
                &[LineItem::new(f.gadget, 5)],
                &f.catalog,
            )
            .unwrap();
        order.apply_events(events);

        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total_amount(), Money::from_units(150));
        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.created_at(), created_at);
    }

    #[test]
    fn test_edit_with_invalid_items_leaves_order_unchanged() {
        let f = fixture();
        let order = place_sale(&f);
        let before = snapshot(&order);

        let result = order.edit(
            CounterpartyRef::Customer(f.alice),
            &[LineItem::new(f.widget, 1), LineItem::new(f.gadget, 0)],
            &f.catalog,
        );

        assert!(matches!(
            result,
            Err(OrderError::Validation(ValidationError::InvalidQuantity { .. }))
        ));
        assert_eq!(snapshot(&order), before);
    }

    #[test]
    fn test_sell_then_sell_again_fails() {
        let f = fixture();
        let mut order = place_sale(&f);

        order.apply_events(order.confirm().unwrap());
        assert_eq!(order.status(), OrderStatus::Confirmed);

        assert_eq!(
            order.confirm(),
            Err(OrderError::InvalidState(InvalidStateError {
                kind: OrderKind::Sale,
                status: OrderStatus::Confirmed,
                action: OrderAction::Confirm,
            }))
        );
    }

    #[test]
    fn test_terminal_orders_reject_every_action() {
        let f = fixture();

        let mut confirmed = place_sale(&f);
        confirmed.apply_events(confirmed.confirm().unwrap());
        let mut cancelled = place_sale(&f);
        cancelled.apply_events(cancelled.cancel(None).unwrap());
        let mut received = place_purchase(&f);
        received.apply_events(received.confirm().unwrap());

        for order in [&confirmed, &cancelled, &received] {
            let before = snapshot(order);
            let counterparty = match order.kind() {
                OrderKind::Sale => CounterpartyRef::Customer(f.alice),
                OrderKind::Purchase => CounterpartyRef::Supplier("Acme".to_string()),
            };

            let results = [
                order.edit(counterparty, &[LineItem::new(f.widget, 1)], &f.catalog),
                order.confirm(),
                order.cancel(None),
                order.delete(),
            ];
            for result in results {
                assert!(matches!(result, Err(OrderError::InvalidState(_))));
            }
            assert_eq!(snapshot(order), before);
            assert!(order.available_actions().is_empty());
        }
    }

    #[test]
    fn test_edit_confirmed_reports_invalid_state_before_validation() {
        let f = fixture();
        let mut order = place_sale(&f);
        order.apply_events(order.confirm().unwrap());

        let result = order.edit(CounterpartyRef::Customer(f.alice), &[], &f.catalog);
        assert!(matches!(result, Err(OrderError::InvalidState(_))));
    }

    #[test]
    fn test_cancel_sale_records_reason() {
        let f = fixture();
        let mut order = place_sale(&f);

        order.apply_events(order.cancel(Some(" out of stock ".to_string())).unwrap());

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.cancellation_reason(), Some("out of stock"));
        assert!(order.is_terminal());
    }

    #[test]
    fn test_purchase_cannot_be_cancelled() {
        let f = fixture();
        let order = place_purchase(&f);

        let err = order.cancel(None).unwrap_err();
        assert_eq!(err.to_string(), "cannot cancel a Pending purchase");
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn test_confirm_as_checks_kind() {
        let f = fixture();
        let mut purchase = place_purchase(&f);

        assert!(matches!(
            purchase.confirm_as(OrderKind::Sale),
            Err(OrderError::Validation(ValidationError::KindMismatch { .. }))
        ));

        purchase.apply_events(purchase.confirm_as(OrderKind::Purchase).unwrap());
        assert_eq!(purchase.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_delete_pending_then_everything_is_not_found() {
        let f = fixture();
        let mut order = place_sale(&f);

        order.apply_events(order.delete().unwrap());

        assert!(order.is_deleted());
        assert_eq!(order.confirm(), Err(OrderError::NotFound));
        assert_eq!(order.delete(), Err(OrderError::NotFound));
        assert!(order.available_actions().is_empty());
    }

    #[test]
    fn test_commands_on_unplaced_order_are_not_found() {
        assert_eq!(Order::default().confirm(), Err(OrderError::NotFound));
        assert_eq!(Order::default().cancel(None), Err(OrderError::NotFound));
    }

    #[test]
    fn test_lines_keep_price_snapshot() {
        let mut f = fixture();
        let order = place_sale(&f);

        f.catalog
            .update_product(f.widget, new_product("Widget v2", "W-1", Money::from_units(99)))
            .unwrap();

        assert_eq!(order.lines()[0].product_name, "Widget");
        assert_eq!(order.lines()[0].unit_price, Money::from_units(50));
        assert_eq!(order.total_amount(), Money::from_units(130));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let f = fixture();
        let order = place_sale(&f);

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id(), order.id());
        assert_eq!(back.total_amount(), order.total_amount());
        assert_eq!(back.lines(), order.lines());
    }
}
