// Transaction-backed stock update scope

use crate::application::catalog::update_stock;
use crate::domain::UpdateStockTask;
use crate::error::{AppError, Result};
use crate::port::{
    ProductRepositoryTransaction, StockScopeFactory, StockUpdateScope,
    TransactionalProductRepository,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Opens one repository transaction per task.
///
/// The worker lives for the whole process, but each task gets its own
/// transaction (and thus its own pooled connection), released before the
/// next task is taken.
pub struct TransactionalScopeFactory {
    tx_repo: Arc<dyn TransactionalProductRepository>,
}

impl TransactionalScopeFactory {
    pub fn new(tx_repo: Arc<dyn TransactionalProductRepository>) -> Self {
        Self { tx_repo }
    }
}

#[async_trait]
impl StockScopeFactory for TransactionalScopeFactory {
    async fn open_scope(&self) -> Result<Box<dyn StockUpdateScope>> {
        let tx = self.tx_repo.begin_transaction().await?;
        Ok(Box::new(TransactionScope { tx }))
    }
}

struct TransactionScope {
    tx: Box<dyn ProductRepositoryTransaction>,
}

#[async_trait]
impl StockUpdateScope for TransactionScope {
    async fn apply(self: Box<Self>, task: UpdateStockTask) -> Result<()> {
        let product_id = task.product_id();
        let updated = update_stock::apply_in(self.tx, &product_id, task.new_quantity()).await?;
        if !updated {
            return Err(AppError::NotFound(format!("Product {} not found", product_id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Product;
    use crate::port::product_repository::mocks::InMemoryProductRepository;
    use crate::port::ProductRepository;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_scope_applies_update() {
        let id = Uuid::from_u128(1);
        let repo = InMemoryProductRepository::with_products(vec![Product::new(
            id,
            "Mock Laptop",
            "https://img/1",
            Decimal::from(25000),
            1,
        )]);
        let factory = TransactionalScopeFactory::new(Arc::new(repo.clone()));

        let scope = factory.open_scope().await.unwrap();
        scope.apply(UpdateStockTask::new(id, 12)).await.unwrap();

        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().stock_quantity, 12);
    }

    #[tokio::test]
    async fn test_scope_missing_product_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let factory = TransactionalScopeFactory::new(Arc::new(repo));

        let scope = factory.open_scope().await.unwrap();
        let err = scope
            .apply(UpdateStockTask::new(Uuid::from_u128(9), 1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
