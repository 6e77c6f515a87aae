//! Order service: the entry point the console calls for every order action.

use common::AggregateId;
use event_store::{EventEnvelope, EventStore};

use crate::aggregate::Aggregate;
use crate::catalog::CatalogService;
use crate::command::{Command, CommandHandler, CommandResult};
use crate::error::DomainError;
use crate::summary::SalesSummary;

use super::{
    CancelOrder, ConfirmOrder, DeleteOrder, EditOrder, Order, OrderError, OrderEvent, OrderKind,
    PlaceOrder,
};

/// Runs order commands against the event store, resolving product and
/// customer references through the shared catalog.
pub struct OrderService<S: EventStore> {
    handler: CommandHandler<S, Order>,
    catalog: CatalogService,
}

impl<S: EventStore> OrderService<S> {
    pub fn new(store: S, catalog: CatalogService) -> Self {
        Self {
            handler: CommandHandler::new(store),
            catalog,
        }
    }

    pub fn handler(&self) -> &CommandHandler<S, Order> {
        &self.handler
    }

    pub fn catalog(&self) -> &CatalogService {
        &self.catalog
    }

    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id, kind = %cmd.kind))]
    pub async fn place_order(&self, cmd: PlaceOrder) -> Result<CommandResult<Order>, DomainError> {
        let catalog = self.catalog.read().await;
        let order_id = cmd.aggregate_id();

        let result = self
            .run("place", order_id, |order| {
                order.place(order_id, cmd.kind, cmd.counterparty, &cmd.items, &*catalog)
            })
            .await?;

        metrics::counter!("orders_placed_total", "kind" => cmd.kind.as_str()).increment(1);
        Ok(result)
    }

    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id))]
    pub async fn edit_order(&self, cmd: EditOrder) -> Result<CommandResult<Order>, DomainError> {
        let catalog = self.catalog.read().await;

        self.run("edit", cmd.aggregate_id(), |order| {
            order.edit(cmd.counterparty, &cmd.items, &*catalog)
        })
        .await
    }

    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id))]
    pub async fn confirm_order(
        &self,
        cmd: ConfirmOrder,
    ) -> Result<CommandResult<Order>, DomainError> {
        let expected_kind = cmd.expected_kind;

        self.run("confirm", cmd.aggregate_id(), |order| match expected_kind {
            Some(kind) => order.confirm_as(kind),
            None => order.confirm(),
        })
        .await
    }

    /// Confirms a Pending sale.
    pub async fn sell(&self, order_id: AggregateId) -> Result<CommandResult<Order>, DomainError> {
        self.confirm_order(ConfirmOrder::sell(order_id)).await
    }

    /// Confirms a Pending purchase as received.
    pub async fn receive(
        &self,
        order_id: AggregateId,
    ) -> Result<CommandResult<Order>, DomainError> {
        self.confirm_order(ConfirmOrder::receive(order_id)).await
    }

    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id))]
    pub async fn cancel_order(
        &self,
        cmd: CancelOrder,
    ) -> Result<CommandResult<Order>, DomainError> {
        self.run("cancel", cmd.aggregate_id(), |order| order.cancel(cmd.reason))
            .await
    }

    #[tracing::instrument(skip(self), fields(order_id = %cmd.order_id))]
    pub async fn delete_order(
        &self,
        cmd: DeleteOrder,
    ) -> Result<CommandResult<Order>, DomainError> {
        self.run("delete", cmd.aggregate_id(), Order::delete).await
    }

    /// Loads an order. `None` if it was never placed or has been deleted.
    pub async fn get_order(&self, order_id: AggregateId) -> Result<Option<Order>, DomainError> {
        Ok(self
            .handler
            .load_existing(order_id)
            .await?
            .filter(|order| !order.is_deleted()))
    }

    /// All live orders of `kind`, oldest first.
    pub async fn list_orders(&self, kind: OrderKind) -> Result<Vec<Order>, DomainError> {
        let ids = self
            .handler
            .store()
            .aggregate_ids(Order::aggregate_type())
            .await?;

        let mut orders = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(order) = self.get_order(id).await?
                && order.kind() == kind
            {
                orders.push(order);
            }
        }
        Ok(orders)
    }

    /// Dashboard figures over the current set of sales.
    #[tracing::instrument(skip(self))]
    pub async fn sales_summary(&self) -> Result<SalesSummary, DomainError> {
        let sales = self.list_orders(OrderKind::Sale).await?;
        Ok(SalesSummary::from_orders(&sales)?)
    }

    /// Every stored event of an order, including deleted ones.
    pub async fn history(&self, order_id: AggregateId) -> Result<Vec<EventEnvelope>, DomainError> {
        let events = self
            .handler
            .store()
            .get_events_for_aggregate(order_id)
            .await?;
        if events.is_empty() {
            return Err(DomainError::AggregateNotFound {
                aggregate_type: Order::aggregate_type(),
                aggregate_id: order_id.to_string(),
            });
        }
        Ok(events)
    }

    async fn run<F>(
        &self,
        action: &'static str,
        order_id: AggregateId,
        command_fn: F,
    ) -> Result<CommandResult<Order>, DomainError>
    where
        F: FnOnce(&Order) -> Result<Vec<OrderEvent>, OrderError>,
    {
        let result = self.handler.execute(order_id, command_fn).await;
        match &result {
            Ok(outcome) => {
                metrics::counter!("order_transitions_total", "action" => action).increment(1);
                tracing::info!(
                    %order_id,
                    action,
                    status = %outcome.aggregate.status(),
                    total = %outcome.aggregate.total_amount(),
                    "order updated"
                );
            }
            Err(e) => {
                metrics::counter!("order_rejections_total", "reason" => e.kind().as_str())
                    .increment(1);
                tracing::warn!(%order_id, action, error = %e, "order command rejected");
            }
        }
        result
    }
}
