// Catalog Service - Core use cases for product management

pub mod create;
pub mod seed;
pub mod update_stock;


pub use create::NewProduct;

use crate::domain::{PageRequest, Product, ProductId};
use crate::error::Result;
use crate::port::{IdProvider, ProductRepository, TransactionalProductRepository};
use std::sync::Arc;
use tracing::instrument;

/// Catalog Service
///
/// Synchronous catalog operations. Queued stock updates go through
/// [`crate::application::StockUpdateQueue`] instead.
pub struct CatalogService {
    product_repo: Arc<dyn ProductRepository>,
    tx_repo: Arc<dyn TransactionalProductRepository>,
    id_provider: Arc<dyn IdProvider>,
}

impl CatalogService {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        tx_repo: Arc<dyn TransactionalProductRepository>,
        id_provider: Arc<dyn IdProvider>,
    ) -> Self {
        Self {
            product_repo,
            tx_repo,
            id_provider,
        }
    }

    /// All products in display order
    pub async fn list_all(&self) -> Result<Vec<Product>> {
        self.product_repo.find_all().await
    }

    /// One page of products in display order
    #[instrument(skip(self))]
    pub async fn list_page(&self, page: PageRequest) -> Result<Vec<Product>> {
        self.product_repo
            .find_page(page.offset(), page.page_size())
            .await
    }

    pub async fn get(&self, id: &ProductId) -> Result<Option<Product>> {
        self.product_repo.find_by_id(id).await
    }

    /// Create a product
    #[instrument(skip(self, req), fields(product_name = %req.name))]
    pub async fn create(&self, req: NewProduct) -> Result<ProductId> {
        create::execute(self.product_repo.as_ref(), self.id_provider.as_ref(), req).await
    }

    /// Set stock immediately (returns false if the product does not exist)
    #[instrument(skip(self))]
    pub async fn update_stock(&self, id: &ProductId, new_quantity: i64) -> Result<bool> {
        update_stock::execute(self.tx_repo.as_ref(), id, new_quantity).await
    }

    /// Populate an empty catalog with demo products
    pub async fn seed_if_empty(&self, count: u32) -> Result<u32> {
        seed::seed_if_empty(self.product_repo.as_ref(), self.id_provider.as_ref(), count).await
    }
}
