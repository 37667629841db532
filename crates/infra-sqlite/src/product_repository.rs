// SQLite ProductRepository Implementation

use crate::error::map_sqlx_error;
use crate::SqliteProductTransaction;
use async_trait::async_trait;
use eshop_core::domain::{Product, ProductId, StockQuantity};
use eshop_core::error::{AppError, Result};
use eshop_core::port::{
    ProductRepository, ProductRepositoryTransaction, TransactionalProductRepository,
};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;
use uuid::Uuid;

pub(crate) const SELECT_PRODUCT: &str = "SELECT id, name, image_url, price, description, \
     stock_quantity, display_order FROM products";

pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProductRepository {
    async fn insert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, image_url, price, description, stock_quantity, display_order
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.id.to_string())
        .bind(&product.name)
        .bind(&product.image_url)
        .bind(product.price.to_string())
        .bind(&product.description)
        .bind(i64::from(product.stock_quantity))
        .bind(product.order)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PRODUCT))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> =
            sqlx::query_as(&format!("{} ORDER BY display_order ASC, id ASC", SELECT_PRODUCT))
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn find_page(&self, offset: i64, limit: i64) -> Result<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "{} ORDER BY display_order ASC, id ASC LIMIT ? OFFSET ?",
            SELECT_PRODUCT
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        rows.into_iter().map(ProductRow::into_product).collect()
    }

    async fn max_order(&self) -> Result<Option<i32>> {
        sqlx::query_scalar("SELECT MAX(display_order) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl TransactionalProductRepository for SqliteProductRepository {
    // BEGIN is DEFERRED: callers must issue their write before any read, or a
    // concurrent commit turns the lock upgrade into SQLITE_BUSY.
    async fn begin_transaction(&self) -> Result<Box<dyn ProductRepositoryTransaction>> {
        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteProductTransaction::new(tx)))
    }
}

/// SQLite row representation
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: String,
    name: String,
    image_url: String,
    price: String,
    description: Option<String>,
    stock_quantity: i64,
    display_order: i32,
}

impl ProductRow {
    pub(crate) fn into_product(self) -> Result<Product> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| AppError::Database(format!("Corrupt product id {}: {}", self.id, e)))?;
        let price = Decimal::from_str(&self.price).map_err(|e| {
            AppError::Database(format!("Corrupt price for product {}: {}", self.id, e))
        })?;
        let stock_quantity = StockQuantity::try_from(self.stock_quantity).map_err(|_| {
            AppError::Database(format!(
                "Corrupt stock quantity for product {}: {}",
                self.id, self.stock_quantity
            ))
        })?;

        Ok(Product {
            id,
            name: self.name,
            image_url: self.image_url,
            price,
            description: self.description,
            stock_quantity,
            order: self.display_order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_pool, run_migrations};

    async fn setup_test_db() -> SqliteProductRepository {
        let pool = create_pool("sqlite::memory:").await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteProductRepository::new(pool)
    }

    fn product(n: u128, order: i32) -> Product {
        Product::new(
            Uuid::from_u128(n),
            format!("Product {}", n),
            format!("https://picsum.photos/seed/{}/200", n),
            Decimal::new(1999, 2),
            order,
        )
        .with_stock(10)
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = setup_test_db().await;
        let p = product(1, 1).with_description("first");

        repo.insert(&p).await.unwrap();

        let found = repo.find_by_id(&p.id).await.unwrap();
        assert_eq!(found, Some(p));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = setup_test_db().await;
        assert!(repo.find_by_id(&Uuid::from_u128(42)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = setup_test_db().await;
        repo.insert(&product(1, 1)).await.unwrap();

        let err = repo.insert(&product(1, 2)).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn test_listing_sorted_and_paged() {
        let repo = setup_test_db().await;
        for (n, order) in [(1, 3), (2, 1), (3, 2)] {
            repo.insert(&product(n, order)).await.unwrap();
        }

        let all = repo.find_all().await.unwrap();
        let orders: Vec<i32> = all.iter().map(|p| p.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);

        let page = repo.find_page(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].order, 2);

        assert!(repo.find_page(10, 10).await.unwrap().is_empty());
        assert_eq!(repo.max_order().await.unwrap(), Some(3));
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_max_order_empty() {
        let repo = setup_test_db().await;
        assert_eq!(repo.max_order().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_transaction_commit_and_rollback() {
        let repo = setup_test_db().await;
        let p = product(1, 1);
        repo.insert(&p).await.unwrap();

        let mut tx = repo.begin_transaction().await.unwrap();
        assert_eq!(tx.update_stock(&p.id, 3).await.unwrap(), 1);
        tx.rollback().await.unwrap();
        assert_eq!(repo.find_by_id(&p.id).await.unwrap().unwrap().stock_quantity, 10);

        let mut tx = repo.begin_transaction().await.unwrap();
        assert_eq!(tx.find_by_id(&p.id).await.unwrap().unwrap().stock_quantity, 10);
        assert_eq!(tx.update_stock(&p.id, 7).await.unwrap(), 1);
        tx.commit().await.unwrap();
        assert_eq!(repo.find_by_id(&p.id).await.unwrap().unwrap().stock_quantity, 7);
    }

    #[tokio::test]
    async fn test_dropped_transaction_rolls_back() {
        let repo = setup_test_db().await;
        let p = product(1, 1);
        repo.insert(&p).await.unwrap();

        {
            let mut tx = repo.begin_transaction().await.unwrap();
            tx.update_stock(&p.id, 0).await.unwrap();
        }

        assert_eq!(repo.find_by_id(&p.id).await.unwrap().unwrap().stock_quantity, 10);
    }

    #[tokio::test]
    async fn test_update_missing_affects_nothing() {
        let repo = setup_test_db().await;
        let mut tx = repo.begin_transaction().await.unwrap();
        assert_eq!(tx.update_stock(&Uuid::from_u128(9), 1).await.unwrap(), 0);
        tx.commit().await.unwrap();
    }
}
