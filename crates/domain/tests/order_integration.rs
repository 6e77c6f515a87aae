//! Integration tests for the order workflow.
//!
//! These exercise the services end to end: catalog lookups, event
//! persistence, aggregate reconstruction and the dashboard summary.

use common::{AggregateId, CustomerId, ProductId};
use domain::{
    Aggregate, CancelOrder, CatalogService, CounterpartyRef, DeleteOrder, DomainError, EditOrder,
    ErrorKind, LineItem, Money, NewCustomer, NewProduct, OrderError, OrderKind, OrderService,
    OrderStatus, PlaceOrder, SalesSummary,
};
use event_store::{EventStore, InMemoryEventStore};

struct Shop {
    service: OrderService<InMemoryEventStore>,
    store: InMemoryEventStore,
    a: ProductId,
    b: ProductId,
    alice: CustomerId,
    bob: CustomerId,
}

fn product(name: &str, sku: &str, price: &str) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        sku: sku.to_string(),
        category: "General".to_string(),
        description: format!("{name} description"),
        quantity_available: 25,
        unit_price: price.parse().unwrap(),
    }
}

fn customer(name: &str) -> NewCustomer {
    NewCustomer {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "555-0100".to_string(),
        address: "1 Main St".to_string(),
    }
}

async fn shop() -> Shop {
    let catalog = CatalogService::new();
    let a = catalog.add_product(product("A", "A-1", "50")).await.unwrap().id();
    let b = catalog.add_product(product("B", "B-1", "30")).await.unwrap().id();
    let alice = catalog.add_customer(customer("Alice")).await.unwrap().id();
    let bob = catalog.add_customer(customer("Bob")).await.unwrap().id();

    let store = InMemoryEventStore::new();
    Shop {
        service: OrderService::new(store.clone(), catalog),
        store,
        a,
        b,
        alice,
        bob,
    }
}

async fn place_sale(shop: &Shop, items: Vec<LineItem>) -> AggregateId {
    let cmd = PlaceOrder::sale(shop.alice, items);
    let id = cmd.order_id;
    shop.service.place_order(cmd).await.unwrap();
    id
}

fn expect_invalid_state(result: Result<impl std::fmt::Debug, DomainError>) {
    match result {
        Err(DomainError::Order(OrderError::InvalidState(_))) => {}
        other => panic!("expected InvalidStateError, got {other:?}"),
    }
}

mod pricing {
    use super::*;

    #[tokio::test]
    async fn sale_total_is_quantity_times_unit_price() {
        let shop = shop().await;
        let cmd = PlaceOrder::sale(
            shop.alice,
            vec![LineItem::new(shop.a, 2), LineItem::new(shop.b, 1)],
        );

        let result = shop.service.place_order(cmd).await.unwrap();

        assert_eq!(
            result.aggregate.line_totals(),
            vec![Money::from_units(100), Money::from_units(30)]
        );
        assert_eq!(result.aggregate.total_amount(), Money::from_units(130));
    }

    #[tokio::test]
    async fn repricing_on_edit_uses_current_catalog_price() {
        let shop = shop().await;
        let id = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;

        shop.service
            .catalog()
            .update_product(shop.a, product("A", "A-1", "12.34"))
            .await
            .unwrap();

        let result = shop
            .service
            .edit_order(EditOrder::new(
                id,
                CounterpartyRef::Customer(shop.bob),
                vec![LineItem::new(shop.a, 3)],
            ))
            .await
            .unwrap();

        assert_eq!(result.aggregate.total_amount().cents(), 3702);
        assert_eq!(result.aggregate.counterparty().unwrap().name(), "Bob");
    }

    #[tokio::test]
    async fn invalid_items_are_rejected_without_persisting() {
        let shop = shop().await;

        let err = shop
            .service
            .place_order(PlaceOrder::sale(
                shop.alice,
                vec![LineItem::new(shop.a, 1), LineItem::new(ProductId::new(), 1)],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(shop.store.event_count().await, 0);
    }

    #[tokio::test]
    async fn sale_to_unknown_customer_is_rejected() {
        let shop = shop().await;

        let err = shop
            .service
            .place_order(PlaceOrder::sale(
                CustomerId::new(),
                vec![LineItem::new(shop.a, 1)],
            ))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn sell_confirms_once() {
        let shop = shop().await;
        let id = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;

        let result = shop.service.sell(id).await.unwrap();
        assert_eq!(result.aggregate.status(), OrderStatus::Confirmed);

        expect_invalid_state(shop.service.sell(id).await);
    }

    #[tokio::test]
    async fn terminal_sales_reject_all_actions_and_stay_unchanged() {
        let shop = shop().await;
        let confirmed = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;
        shop.service.sell(confirmed).await.unwrap();
        let cancelled = place_sale(&shop, vec![LineItem::new(shop.b, 2)]).await;
        shop.service
            .cancel_order(CancelOrder::new(cancelled, None))
            .await
            .unwrap();

        for id in [confirmed, cancelled] {
            let events_before = shop.service.history(id).await.unwrap().len();
            let before = shop.service.get_order(id).await.unwrap().unwrap();

            expect_invalid_state(
                shop.service
                    .edit_order(EditOrder::new(
                        id,
                        CounterpartyRef::Customer(shop.alice),
                        vec![LineItem::new(shop.a, 9)],
                    ))
                    .await,
            );
            expect_invalid_state(shop.service.sell(id).await);
            expect_invalid_state(
                shop.service
                    .cancel_order(CancelOrder::new(id, Some("again".to_string())))
                    .await,
            );
            expect_invalid_state(shop.service.delete_order(DeleteOrder::new(id)).await);

            let after = shop.service.get_order(id).await.unwrap().unwrap();
            assert_eq!(after.status(), before.status());
            assert_eq!(after.total_amount(), before.total_amount());
            assert_eq!(after.lines(), before.lines());
            assert_eq!(shop.service.history(id).await.unwrap().len(), events_before);
        }
    }

    #[tokio::test]
    async fn purchases_are_received_but_never_cancelled() {
        let shop = shop().await;
        let cmd = PlaceOrder::purchase("Acme Supply", vec![LineItem::new(shop.b, 10)]);
        let id = cmd.order_id;
        let placed = shop.service.place_order(cmd).await.unwrap();
        assert_eq!(placed.aggregate.total_amount(), Money::from_units(300));

        expect_invalid_state(shop.service.cancel_order(CancelOrder::new(id, None)).await);

        let received = shop.service.receive(id).await.unwrap();
        assert_eq!(received.aggregate.status(), OrderStatus::Confirmed);
        expect_invalid_state(shop.service.receive(id).await);
    }

    #[tokio::test]
    async fn deleted_orders_disappear_but_keep_history() {
        let shop = shop().await;
        let id = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;

        shop.service
            .delete_order(DeleteOrder::new(id))
            .await
            .unwrap();

        assert!(shop.service.get_order(id).await.unwrap().is_none());
        assert!(shop.service.list_orders(OrderKind::Sale).await.unwrap().is_empty());

        let err = shop.service.sell(id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let history = shop.service.history(id).await.unwrap();
        let types: Vec<_> = history.iter().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["OrderPlaced", "OrderDeleted"]);
    }

    #[tokio::test]
    async fn order_is_rebuilt_from_its_events() {
        let shop = shop().await;
        let id = place_sale(&shop, vec![LineItem::new(shop.a, 2)]).await;
        shop.service.sell(id).await.unwrap();

        let fresh = OrderService::new(shop.store.clone(), shop.service.catalog().clone());
        let order = fresh.get_order(id).await.unwrap().unwrap();

        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.total_amount(), Money::from_units(100));
        assert_eq!(
            shop.store.get_aggregate_version(id).await.unwrap(),
            Some(order.version())
        );
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn summary_counts_statuses_and_confirmed_revenue() {
        let shop = shop().await;
        // Pending: 2 x A = 100
        place_sale(&shop, vec![LineItem::new(shop.a, 2)]).await;
        // Confirmed: 4 x A = 200
        let confirmed = place_sale(&shop, vec![LineItem::new(shop.a, 4)]).await;
        shop.service.sell(confirmed).await.unwrap();
        // Cancelled: 1 x A = 50
        let cancelled = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;
        shop.service
            .cancel_order(CancelOrder::new(cancelled, None))
            .await
            .unwrap();
        // Deleted sales and purchases never count.
        let deleted = place_sale(&shop, vec![LineItem::new(shop.b, 1)]).await;
        shop.service
            .delete_order(DeleteOrder::new(deleted))
            .await
            .unwrap();
        let purchase = PlaceOrder::purchase("Acme", vec![LineItem::new(shop.a, 1)]);
        let purchase_id = purchase.order_id;
        shop.service.place_order(purchase).await.unwrap();
        shop.service.receive(purchase_id).await.unwrap();

        let summary = shop.service.sales_summary().await.unwrap();

        assert_eq!(
            summary,
            SalesSummary {
                total_sales: 3,
                confirmed_sales: 1,
                cancelled_sales: 1,
                pending_sales: 1,
                total_revenue: Money::from_units(200),
            }
        );
    }

    #[tokio::test]
    async fn lists_are_split_by_kind_in_creation_order() {
        let shop = shop().await;
        let first = place_sale(&shop, vec![LineItem::new(shop.a, 1)]).await;
        shop.service
            .place_order(PlaceOrder::purchase("Acme", vec![LineItem::new(shop.a, 1)]))
            .await
            .unwrap();
        let second = place_sale(&shop, vec![LineItem::new(shop.b, 1)]).await;

        let sales = shop.service.list_orders(OrderKind::Sale).await.unwrap();
        let ids: Vec<_> = sales.iter().map(|o| o.id()).collect();
        assert_eq!(ids, vec![Some(first), Some(second)]);
        assert_eq!(
            shop.service
                .list_orders(OrderKind::Purchase)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
