//! Replays scripts against the catalog and order services.

use std::collections::HashMap;

use common::{AggregateId, CustomerId, ProductId};
use domain::{
    Aggregate, CancelOrder, CatalogService, CounterpartyRef, DeleteOrder, EditOrder, LineItem,
    NewCustomer, NewProduct, OrderKind, OrderService, PlaceOrder, Role, Section,
};
use event_store::EventStore;
use serde::Serialize;

use crate::config::Config;
use crate::error::ConsoleError;
use crate::script::{CustomerForm, ItemRow, ProductForm, Script, Step};
use crate::view::{OrderView, SummaryView};

/// How a single step went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepResult {
    Applied,
    Rejected {
        reason: &'static str,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    /// Zero-based position in the script.
    pub step: usize,
    pub action: &'static str,
    #[serde(flatten)]
    pub result: StepResult,
}

/// Everything the console shows after a run. Lists the role may not see
/// are left out.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub role: Role,
    pub steps: Vec<StepOutcome>,
    pub dashboard: SummaryView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<OrderView>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchases: Option<Vec<OrderView>>,
}

impl RunReport {
    pub fn rejected(&self) -> impl Iterator<Item = &StepOutcome> {
        self.steps
            .iter()
            .filter(|outcome| matches!(outcome.result, StepResult::Rejected { .. }))
    }
}

/// A console session: the services plus the script keys seen so far.
pub struct Console<S: EventStore> {
    service: OrderService<S>,
    config: Config,
    role: Role,
    products: HashMap<String, ProductId>,
    customers: HashMap<String, CustomerId>,
    orders: HashMap<String, (AggregateId, OrderKind)>,
}

impl<S: EventStore> Console<S> {
    pub fn new(store: S, config: Config) -> Self {
        let role = config.role;
        Self {
            service: OrderService::new(store, CatalogService::new()),
            config,
            role,
            products: HashMap::new(),
            customers: HashMap::new(),
            orders: HashMap::new(),
        }
    }

    pub fn service(&self) -> &OrderService<S> {
        &self.service
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Order id registered under `key`, if any.
    pub fn order_id(&self, key: &str) -> Option<AggregateId> {
        self.orders.get(key).map(|(id, _)| *id)
    }

    /// Runs every step in order. A rejected step is recorded and the run
    /// continues; only failures to build the final report are errors.
    #[tracing::instrument(skip_all, fields(steps = script.steps.len()))]
    pub async fn run(&mut self, script: Script) -> Result<RunReport, ConsoleError> {
        if let Some(role) = script.role {
            self.role = role;
        }
        tracing::info!(role = %self.role, "running script");

        let mut outcomes = Vec::with_capacity(script.steps.len());
        for (index, step) in script.steps.iter().enumerate() {
            let result = match self.apply(step).await {
                Ok(()) => StepResult::Applied,
                Err(e) => {
                    tracing::warn!(
                        step = index,
                        action = step.action(),
                        error = %e,
                        "step rejected"
                    );
                    StepResult::Rejected {
                        reason: e.reason(),
                        message: e.to_string(),
                    }
                }
            };
            outcomes.push(StepOutcome {
                step: index,
                action: step.action(),
                result,
            });
        }

        let mut report = self.report().await?;
        report.steps = outcomes;
        Ok(report)
    }

    /// Applies one step on behalf of the current role.
    pub async fn apply(&mut self, step: &Step) -> Result<(), ConsoleError> {
        if let Some(section) = step.section() {
            self.authorize(section)?;
        }

        match step {
            Step::AddProduct { key, form } => {
                Self::ensure_free("product", &self.products, key)?;
                let product = self
                    .service
                    .catalog()
                    .add_product(new_product(form)?)
                    .await?;
                self.products.insert(key.clone(), product.id());
            }
            Step::UpdateProduct { product, form } => {
                let id = Self::lookup("product", &self.products, product)?;
                self.service
                    .catalog()
                    .update_product(id, new_product(form)?)
                    .await?;
            }
            Step::AddCustomer { key, form } => {
                Self::ensure_free("customer", &self.customers, key)?;
                let customer = self
                    .service
                    .catalog()
                    .add_customer(new_customer(form))
                    .await?;
                self.customers.insert(key.clone(), customer.id());
            }
            Step::CreateSale {
                key,
                customer,
                items,
            } => {
                Self::ensure_free("order", &self.orders, key)?;
                let customer_id = Self::lookup("customer", &self.customers, customer)?;
                let cmd = PlaceOrder::sale(customer_id, self.line_items(items)?);
                let order_id = cmd.order_id;
                self.service.place_order(cmd).await?;
                self.orders.insert(key.clone(), (order_id, OrderKind::Sale));
            }
            Step::CreatePurchase {
                key,
                supplier,
                items,
            } => {
                Self::ensure_free("order", &self.orders, key)?;
                let cmd = PlaceOrder::purchase(supplier.as_str(), self.line_items(items)?);
                let order_id = cmd.order_id;
                self.service.place_order(cmd).await?;
                self.orders.insert(key.clone(), (order_id, OrderKind::Purchase));
            }
            Step::EditSale {
                order,
                customer,
                items,
            } => {
                let order_id = self.target(order)?;
                let customer_id = Self::lookup("customer", &self.customers, customer)?;
                self.service
                    .edit_order(EditOrder::new(
                        order_id,
                        CounterpartyRef::Customer(customer_id),
                        self.line_items(items)?,
                    ))
                    .await?;
            }
            Step::EditPurchase {
                order,
                supplier,
                items,
            } => {
                let order_id = self.target(order)?;
                self.service
                    .edit_order(EditOrder::new(
                        order_id,
                        CounterpartyRef::Supplier(supplier.clone()),
                        self.line_items(items)?,
                    ))
                    .await?;
            }
            Step::Sell { order } => {
                let order_id = self.target(order)?;
                self.service.sell(order_id).await?;
            }
            Step::Receive { order } => {
                let order_id = self.target(order)?;
                self.service.receive(order_id).await?;
            }
            Step::CancelSale { order, reason } => {
                let order_id = self.target(order)?;
                self.service
                    .cancel_order(CancelOrder::new(order_id, reason.clone()))
                    .await?;
            }
            Step::Delete { order } => {
                let order_id = self.target(order)?;
                self.service.delete_order(DeleteOrder::new(order_id)).await?;
            }
        }
        Ok(())
    }

    /// Current dashboard and order lists as the role would see them.
    pub async fn report(&self) -> Result<RunReport, ConsoleError> {
        let summary = self.service.sales_summary().await?;
        Ok(RunReport {
            role: self.role,
            steps: Vec::new(),
            dashboard: SummaryView::new(&summary, &self.config),
            sales: self.list(OrderKind::Sale).await?,
            purchases: self.list(OrderKind::Purchase).await?,
        })
    }

    async fn list(&self, kind: OrderKind) -> Result<Option<Vec<OrderView>>, ConsoleError> {
        if !self.role.can_access(section_for(kind)) {
            return Ok(None);
        }

        let keys: HashMap<AggregateId, &str> = self
            .orders
            .iter()
            .map(|(key, (id, _))| (*id, key.as_str()))
            .collect();

        let orders = self.service.list_orders(kind).await?;
        let views = orders
            .iter()
            .map(|order| {
                let key = order
                    .id()
                    .and_then(|id| keys.get(&id))
                    .map(|key| key.to_string());
                OrderView::new(order, key, &self.config)
            })
            .collect();
        Ok(Some(views))
    }

    fn authorize(&self, section: Section) -> Result<(), ConsoleError> {
        if self.role.can_access(section) {
            Ok(())
        } else {
            Err(ConsoleError::AccessDenied {
                role: self.role,
                section,
            })
        }
    }

    /// Resolves an order key, checking the role may see orders of its kind.
    fn target(&self, key: &str) -> Result<AggregateId, ConsoleError> {
        let (order_id, kind) = Self::lookup("order", &self.orders, key)?;
        self.authorize(section_for(kind))?;
        Ok(order_id)
    }

    fn line_items(&self, rows: &[ItemRow]) -> Result<Vec<LineItem>, ConsoleError> {
        rows.iter()
            .map(|row| {
                let product_id = Self::lookup("product", &self.products, &row.product)?;
                Ok(LineItem::new(product_id, row.quantity))
            })
            .collect()
    }

    fn lookup<T: Copy>(
        kind: &'static str,
        keys: &HashMap<String, T>,
        key: &str,
    ) -> Result<T, ConsoleError> {
        keys.get(key).copied().ok_or_else(|| ConsoleError::UnknownKey {
            kind,
            key: key.to_string(),
        })
    }

    fn ensure_free<T>(
        kind: &'static str,
        keys: &HashMap<String, T>,
        key: &str,
    ) -> Result<(), ConsoleError> {
        if keys.contains_key(key) {
            Err(ConsoleError::DuplicateKey {
                kind,
                key: key.to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn section_for(kind: OrderKind) -> Section {
    match kind {
        OrderKind::Sale => Section::Sales,
        OrderKind::Purchase => Section::Purchases,
    }
}

fn new_product(form: &ProductForm) -> Result<NewProduct, ConsoleError> {
    Ok(NewProduct {
        name: form.name.clone(),
        sku: form.sku.clone(),
        category: form.category.clone(),
        description: form.description.clone(),
        quantity_available: form.quantity_available,
        unit_price: form.unit_price.parse()?,
    })
}

fn new_customer(form: &CustomerForm) -> NewCustomer {
    NewCustomer {
        name: form.name.clone(),
        email: form.email.clone(),
        phone: form.phone.clone(),
        address: form.address.clone(),
    }
}
