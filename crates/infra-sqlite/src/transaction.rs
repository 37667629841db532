// SQLite Transaction Implementation

use crate::error::map_sqlx_error;
use crate::product_repository::{ProductRow, SELECT_PRODUCT};
use async_trait::async_trait;
use eshop_core::domain::{Product, ProductId, StockQuantity};
use eshop_core::error::Result;
use eshop_core::port::{ProductRepositoryTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

/// One SQLite transaction on its own pooled connection.
///
/// Dropped without commit, sqlx rolls it back.
pub struct SqliteProductTransaction {
    tx: SqlxTransaction<'static, Sqlite>,
}

impl SqliteProductTransaction {
    pub fn new(tx: SqlxTransaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteProductTransaction {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)
    }
}

#[async_trait]
impl ProductRepositoryTransaction for SqliteProductTransaction {
    async fn find_by_id(&mut self, id: &ProductId) -> Result<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_PRODUCT))
            .bind(id.to_string())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        row.map(ProductRow::into_product).transpose()
    }

    async fn update_stock(&mut self, id: &ProductId, quantity: StockQuantity) -> Result<u64> {
        let result = sqlx::query("UPDATE products SET stock_quantity = ? WHERE id = ?")
            .bind(i64::from(quantity))
            .bind(id.to_string())
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}
