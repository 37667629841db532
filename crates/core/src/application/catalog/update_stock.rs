// Update Stock Use Case (synchronous path)

use crate::domain::product::stock_quantity_from;
use crate::domain::{ProductId, StockQuantity};
use crate::error::Result;
use crate::port::{ProductRepositoryTransaction, TransactionalProductRepository};

/// Execute update-stock use case in its own transaction.
///
/// Returns `Ok(false)` when the product does not exist.
pub async fn execute(
    tx_repo: &dyn TransactionalProductRepository,
    product_id: &ProductId,
    new_quantity: i64,
) -> Result<bool> {
    let quantity = stock_quantity_from(new_quantity)?;
    let tx = tx_repo.begin_transaction().await?;
    apply_in(tx, product_id, quantity).await
}

/// Write inside an already-open transaction; zero rows affected means the
/// product does not exist.
///
/// The write is the first statement so the transaction takes the write lock
/// up front (waiting on the busy timeout) instead of upgrading a read
/// snapshot, which fails outright once another connection has committed.
///
/// Consumes the transaction: committed on success, rolled back when the
/// product is missing, dropped (rolled back) on error.
pub(crate) async fn apply_in(
    mut tx: Box<dyn ProductRepositoryTransaction>,
    product_id: &ProductId,
    quantity: StockQuantity,
) -> Result<bool> {
    if tx.update_stock(product_id, quantity).await? == 0 {
        tx.rollback().await?;
        return Ok(false);
    }

    tx.commit().await?;
    Ok(true)
}
