// Create Product Use Case

use crate::domain::product::stock_quantity_from;
use crate::domain::{Product, ProductId};
use crate::error::Result;
use crate::port::{IdProvider, ProductRepository};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01
const MAX_PRICE: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// Create request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(
        min = 3,
        max = 100,
        message = "Name must be between 3 and 100 characters."
    ))]
    pub name: String,

    #[validate(url(message = "Invalid URL format."))]
    pub image_url: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,

    #[validate(length(max = 1000, message = "Description cannot exceed 1000 characters."))]
    #[serde(default)]
    pub description: Option<String>,

    #[validate(range(min = 0, max = 2147483647, message = "Stock quantity cannot be negative."))]
    #[serde(default)]
    pub stock_quantity: i64,
}

fn validate_price(price: &Decimal) -> std::result::Result<(), ValidationError> {
    if *price < MIN_PRICE || *price > MAX_PRICE {
        let mut err = ValidationError::new("price_range");
        err.message = Some("Price must be between 0.01 and 100,000.".into());
        return Err(err);
    }
    Ok(())
}

/// Validate request fields
pub fn validate_request(req: &NewProduct) -> Result<()> {
    req.validate()?;
    Ok(())
}

/// Execute create use case
///
/// The new product is appended after the current highest display order.
pub async fn execute(
    product_repo: &dyn ProductRepository,
    id_provider: &dyn IdProvider,
    req: NewProduct,
) -> Result<ProductId> {
    validate_request(&req)?;
    let stock = stock_quantity_from(req.stock_quantity)?;

    let order = product_repo
        .max_order()
        .await?
        .map_or(1, |max| max.saturating_add(1));

    let id = id_provider.generate_id();
    let mut product = Product::new(id, req.name, req.image_url, req.price, order).with_stock(stock);
    product.description = req.description;

    product_repo.insert(&product).await?;

    Ok(id)
}
