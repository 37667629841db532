// Transaction port for atomic operations

use crate::domain::{Product, ProductId, StockQuantity};
use crate::error::Result;
use async_trait::async_trait;

/// Transaction trait for atomic multi-step operations
///
/// Dropping a transaction without committing rolls it back.
#[async_trait]
pub trait Transaction: Send {
    /// Commit the transaction
    async fn commit(self: Box<Self>) -> Result<()>;

    /// Rollback the transaction
    async fn rollback(self: Box<Self>) -> Result<()>;
}

/// Transactional ProductRepository operations
#[async_trait]
pub trait TransactionalProductRepository: Send + Sync {
    /// Begin a new transaction (acquires its own connection)
    async fn begin_transaction(&self) -> Result<Box<dyn ProductRepositoryTransaction>>;
}

/// ProductRepository operations within a transaction
#[async_trait]
pub trait ProductRepositoryTransaction: Transaction {
    /// Find product by ID (within transaction)
    async fn find_by_id(&mut self, id: &ProductId) -> Result<Option<Product>>;

    /// Overwrite stock level (within transaction), returns rows affected
    async fn update_stock(&mut self, id: &ProductId, quantity: StockQuantity) -> Result<u64>;
}
