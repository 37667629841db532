// Product Domain Model

use crate::domain::error::{DomainError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Product ID (UUID v4)
pub type ProductId = Uuid;

/// Units on hand (never negative)
pub type StockQuantity = u32;

/// Product Entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub stock_quantity: StockQuantity,

    /// Display position, listings sort ascending by this
    pub order: i32,
}

impl Product {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        image_url: impl Into<String>,
        price: Decimal,
        order: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: image_url.into(),
            price,
            description: None,
            stock_quantity: 0,
            order,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_stock(mut self, stock_quantity: StockQuantity) -> Self {
        self.stock_quantity = stock_quantity;
        self
    }

    /// Overwrite the stock level
    pub fn set_stock(&mut self, stock_quantity: StockQuantity) {
        self.stock_quantity = stock_quantity;
    }
}

/// Convert a caller-supplied quantity into a stock level.
///
/// Negative values and values above `i32::MAX` (the storage range) are rejected.
pub fn stock_quantity_from(raw: i64) -> Result<StockQuantity> {
    if raw < 0 {
        return Err(DomainError::NegativeQuantity(raw));
    }
    if raw > i64::from(i32::MAX) {
        return Err(DomainError::QuantityOutOfRange(raw));
    }
    // In range after the checks above
    Ok(raw as StockQuantity)
}
