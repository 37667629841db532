// Product Repository Port (Interface)

use crate::domain::{Product, ProductId};
use crate::error::Result;
use async_trait::async_trait;

/// Repository interface for Product persistence
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn insert(&self, product: &Product) -> Result<()>;

    /// Find product by ID
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>>;

    /// All products, ordered by display order
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// One page of products, ordered by display order
    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>>;

    /// Highest display order in use (None when the catalog is empty)
    async fn max_order(&self) -> Result<Option<i32>>;

    /// Number of products
    async fn count(&self) -> Result<i64>;
}

// ============================================================================
// In-memory implementation for tests
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::StockQuantity;
    use crate::port::transaction::{
        ProductRepositoryTransaction, Transaction, TransactionalProductRepository,
    };
    use std::sync::{Arc, Mutex, MutexGuard};

    /// Vec-backed repository; writes made through a transaction become
    /// visible only on commit.
    #[derive(Clone, Default)]
    pub struct InMemoryProductRepository {
        products: Arc<Mutex<Vec<Product>>>,
    }

    impl InMemoryProductRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_products(products: Vec<Product>) -> Self {
            Self {
                products: Arc::new(Mutex::new(products)),
            }
        }

        fn lock(&self) -> MutexGuard<'_, Vec<Product>> {
            lock(&self.products)
        }

        fn sorted(&self) -> Vec<Product> {
            let mut products = self.lock().clone();
            products.sort_by_key(|p| (p.order, p.id));
            products
        }
    }

    fn lock(products: &Mutex<Vec<Product>>) -> MutexGuard<'_, Vec<Product>> {
        products.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn insert(&self, product: &Product) -> Result<()> {
            let mut products = self.lock();
            if products.iter().any(|p| p.id == product.id) {
                return Err(crate::error::AppError::Database(format!(
                    "Unique constraint violation: products.id {}",
                    product.id
                )));
            }
            products.push(product.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
            Ok(self.lock().iter().find(|p| &p.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Product>> {
            Ok(self.sorted())
        }

        async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
            let offset = usize::try_from(offset).unwrap_or(0);
            let limit = usize::try_from(limit).unwrap_or(0);
            Ok(self.sorted().into_iter().skip(offset).take(limit).collect())
        }

        async fn max_order(&self) -> Result<Option<i32>> {
            Ok(self.lock().iter().map(|p| p.order).max())
        }

        async fn count(&self) -> Result<i64> {
            Ok(self.lock().len() as i64)
        }
    }

    #[async_trait]
    impl TransactionalProductRepository for InMemoryProductRepository {
        async fn begin_transaction(&self) -> Result<Box<dyn ProductRepositoryTransaction>> {
            Ok(Box::new(InMemoryTransaction {
                products: Arc::clone(&self.products),
                staged: Vec::new(),
            }))
        }
    }

    pub struct InMemoryTransaction {
        products: Arc<Mutex<Vec<Product>>>,
        staged: Vec<(ProductId, StockQuantity)>,
    }

    #[async_trait]
    impl Transaction for InMemoryTransaction {
        async fn commit(self: Box<Self>) -> Result<()> {
            let mut products = lock(&self.products);
            for (id, quantity) in &self.staged {
                if let Some(product) = products.iter_mut().find(|p| &p.id == id) {
                    product.set_stock(*quantity);
                }
            }
            Ok(())
        }

        async fn rollback(self: Box<Self>) -> Result<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl ProductRepositoryTransaction for InMemoryTransaction {
        async fn find_by_id(&mut self, id: &ProductId) -> Result<Option<Product>> {
            let mut found = lock(&self.products).iter().find(|p| &p.id == id).cloned();
            if let Some(product) = found.as_mut() {
                if let Some((_, quantity)) = self.staged.iter().rev().find(|(sid, _)| sid == id) {
                    product.set_stock(*quantity);
                }
            }
            Ok(found)
        }

        async fn update_stock(&mut self, id: &ProductId, quantity: StockQuantity) -> Result<u64> {
            let exists = lock(&self.products).iter().any(|p| &p.id == id);
            if !exists {
                return Ok(0);
            }
            self.staged.push((*id, quantity));
            Ok(1)
        }
    }
}
