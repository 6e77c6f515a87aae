//! Value objects for the order domain.

use common::{CustomerId, ProductId};
use serde::{Deserialize, Serialize};

use super::{OrderKind, ValidationError};
use crate::Money;
use crate::catalog::{CustomerLookup, Product};

/// A requested (product, quantity) pair, before pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

/// A line item priced against the catalog.
///
/// Name, SKU and unit price are copied from the product when the line is
/// priced so the order keeps showing what was agreed even if the product
/// changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub sku: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

impl PricedLine {
    pub(super) fn new(product: &Product, quantity: u32) -> Result<Self, ValidationError> {
        let line_total = product
            .unit_price()
            .checked_mul(quantity)
            .ok_or(ValidationError::AmountOverflow)?;

        Ok(Self {
            product_id: product.id(),
            product_name: product.name().to_string(),
            sku: product.sku().to_string(),
            unit_price: product.unit_price(),
            quantity,
            line_total,
        })
    }
}

/// Counterparty as submitted with an order: an unresolved customer
/// reference or a free-text supplier name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CounterpartyRef {
    Customer(CustomerId),
    Supplier(String),
}

impl CounterpartyRef {
    /// Checks the reference fits `kind` and resolves customers against
    /// `customers`.
    pub fn resolve<C>(self, kind: OrderKind, customers: &C) -> Result<Counterparty, ValidationError>
    where
        C: CustomerLookup + ?Sized,
    {
        match (kind, self) {
            (OrderKind::Sale, CounterpartyRef::Customer(customer_id)) => {
                let customer = customers
                    .customer(&customer_id)
                    .ok_or(ValidationError::UnknownCustomer(customer_id))?;
                Ok(Counterparty::Customer {
                    customer_id,
                    name: customer.name().to_string(),
                })
            }
            (OrderKind::Purchase, CounterpartyRef::Supplier(name)) => {
                let name = name.trim();
                if name.is_empty() {
                    return Err(ValidationError::SupplierRequired);
                }
                Ok(Counterparty::Supplier {
                    name: name.to_string(),
                })
            }
            (kind, CounterpartyRef::Customer(_)) => Err(ValidationError::CounterpartyMismatch {
                kind,
                given: "customer",
            }),
            (kind, CounterpartyRef::Supplier(_)) => Err(ValidationError::CounterpartyMismatch {
                kind,
                given: "supplier",
            }),
        }
    }
}

/// The resolved other side of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Counterparty {
    Customer { customer_id: CustomerId, name: String },
    Supplier { name: String },
}

impl Counterparty {
    /// Display name of the customer or supplier.
    pub fn name(&self) -> &str {
        match self {
            Counterparty::Customer { name, .. } | Counterparty::Supplier { name } => name,
        }
    }
}
