//! Products and customers that orders refer to.

mod customer;
mod product;
mod service;

pub use customer::{Customer, NewCustomer};
pub use product::{NewProduct, Product};
pub use service::CatalogService;

use std::collections::HashMap;

use common::{CustomerId, ProductId};
use thiserror::Error;

/// Errors raised while validating or storing catalog records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Unit price must not be negative (got {0})")]
    NegativePrice(crate::Money),

    #[error("A product with SKU {0} already exists")]
    DuplicateSku(String),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),
}

/// Resolves product references to their current catalog entry.
pub trait ProductLookup {
    fn product(&self, id: &ProductId) -> Option<&Product>;
}

/// Resolves customer references to their current catalog entry.
pub trait CustomerLookup {
    fn customer(&self, id: &CustomerId) -> Option<&Customer>;
}

impl ProductLookup for HashMap<ProductId, Product> {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.get(id)
    }
}

impl CustomerLookup for HashMap<CustomerId, Customer> {
    fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.get(id)
    }
}

/// The product and customer records known to the console.
///
/// SKUs are unique, compared case-insensitively after trimming.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: HashMap<ProductId, Product>,
    customers: HashMap<CustomerId, Customer>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&mut self, new: NewProduct) -> Result<&Product, CatalogError> {
        let product = Product::new(ProductId::new(), new)?;
        self.ensure_sku_free(product.sku(), None)?;
        let id = product.id();
        Ok(self.products.entry(id).or_insert(product))
    }

    /// Replaces every editable field of an existing product.
    pub fn update_product(
        &mut self,
        id: ProductId,
        new: NewProduct,
    ) -> Result<&Product, CatalogError> {
        if !self.products.contains_key(&id) {
            return Err(CatalogError::ProductNotFound(id));
        }
        let product = Product::new(id, new)?;
        self.ensure_sku_free(product.sku(), Some(id))?;
        let slot = self
            .products
            .get_mut(&id)
            .ok_or(CatalogError::ProductNotFound(id))?;
        *slot = product;
        Ok(slot)
    }

    pub fn remove_product(&mut self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .remove(&id)
            .ok_or(CatalogError::ProductNotFound(id))
    }

    /// Products sorted by name.
    pub fn products(&self) -> Vec<&Product> {
        let mut products: Vec<_> = self.products.values().collect();
        products.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.sku().cmp(b.sku())));
        products
    }

    pub fn add_customer(&mut self, new: NewCustomer) -> Result<&Customer, CatalogError> {
        let customer = Customer::new(CustomerId::new(), new)?;
        let id = customer.id();
        Ok(self.customers.entry(id).or_insert(customer))
    }

    pub fn update_customer(
        &mut self,
        id: CustomerId,
        new: NewCustomer,
    ) -> Result<&Customer, CatalogError> {
        let customer = Customer::new(id, new)?;
        let slot = self
            .customers
            .get_mut(&id)
            .ok_or(CatalogError::CustomerNotFound(id))?;
        *slot = customer;
        Ok(slot)
    }

    pub fn remove_customer(&mut self, id: CustomerId) -> Result<Customer, CatalogError> {
        self.customers
            .remove(&id)
            .ok_or(CatalogError::CustomerNotFound(id))
    }

    /// Customers sorted by name.
    pub fn customers(&self) -> Vec<&Customer> {
        let mut customers: Vec<_> = self.customers.values().collect();
        customers.sort_by(|a, b| a.name().cmp(b.name()));
        customers
    }

    fn ensure_sku_free(&self, sku: &str, except: Option<ProductId>) -> Result<(), CatalogError> {
        let taken = self
            .products
            .values()
            .any(|p| Some(p.id()) != except && p.sku().eq_ignore_ascii_case(sku));
        if taken {
            Err(CatalogError::DuplicateSku(sku.to_string()))
        } else {
            Ok(())
        }
    }
}

impl ProductLookup for Catalog {
    fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }
}

impl CustomerLookup for Catalog {
    fn customer(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }
}
