// Stock Update Task

use crate::domain::product::{ProductId, StockQuantity};
use serde::{Deserialize, Serialize};

/// Instruction to set a product's stock to an absolute quantity.
///
/// Immutable once built. Two tasks with the same fields are still two
/// independent units of work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateStockTask {
    product_id: ProductId,
    new_quantity: StockQuantity,
}

impl UpdateStockTask {
    pub fn new(product_id: ProductId, new_quantity: StockQuantity) -> Self {
        Self {
            product_id,
            new_quantity,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn new_quantity(&self) -> StockQuantity {
        self.new_quantity
    }
}
