use std::sync::Arc;

use common::{CustomerId, ProductId};
use tokio::sync::{RwLock, RwLockReadGuard};

use super::{Catalog, CatalogError, Customer, NewCustomer, NewProduct, Product};

/// Shared, async access to the [`Catalog`].
///
/// Clones share the same catalog.
#[derive(Debug, Clone, Default)]
pub struct CatalogService {
    catalog: Arc<RwLock<Catalog>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access for pricing and reference resolution.
    pub async fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.catalog.read().await
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_product(&self, new: NewProduct) -> Result<Product, CatalogError> {
        let mut catalog = self.catalog.write().await;
        let product = catalog.add_product(new).inspect_err(|e| {
            tracing::warn!(error = %e, "product rejected");
        })?;
        tracing::info!(product_id = %product.id(), sku = product.sku(), "product added");
        Ok(product.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        new: NewProduct,
    ) -> Result<Product, CatalogError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.update_product(id, new)?.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.catalog.write().await.remove_product(id)
    }

    pub async fn products(&self) -> Vec<Product> {
        self.read().await.products().into_iter().cloned().collect()
    }

    #[tracing::instrument(skip(self))]
    pub async fn add_customer(&self, new: NewCustomer) -> Result<Customer, CatalogError> {
        let mut catalog = self.catalog.write().await;
        let customer = catalog.add_customer(new)?;
        tracing::info!(customer_id = %customer.id(), "customer added");
        Ok(customer.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        new: NewCustomer,
    ) -> Result<Customer, CatalogError> {
        let mut catalog = self.catalog.write().await;
        Ok(catalog.update_customer(id, new)?.clone())
    }

    #[tracing::instrument(skip(self))]
    pub async fn remove_customer(&self, id: CustomerId) -> Result<Customer, CatalogError> {
        self.catalog.write().await.remove_customer(id)
    }

    pub async fn customers(&self) -> Vec<Customer> {
        self.read().await.customers().into_iter().cloned().collect()
    }
}
