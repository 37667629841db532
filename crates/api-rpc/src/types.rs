//! RPC Request/Response Types
//!
//! Defines the JSON-RPC method parameters and results.

use eshop_core::application::catalog::NewProduct;
use eshop_core::domain::{Product, ProductId, StockQuantity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Product as returned by every listing/get method
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub stock_quantity: StockQuantity,
    pub order: i32,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            image_url: p.image_url,
            price: p.price,
            description: p.description,
            stock_quantity: p.stock_quantity,
            order: p.order,
        }
    }
}

/// products.list.v2 - One page of products
#[derive(Debug, Default, Deserialize)]
pub struct ListPageRequest {
    #[serde(default)]
    pub page_number: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListPageResponse {
    pub page_number: i64,
    pub page_size: i64,
    pub items: Vec<ProductResponse>,
}

/// products.get.v1 - Get one product
#[derive(Debug, Deserialize)]
pub struct GetProductRequest {
    pub id: ProductId,
}

/// products.create.v1 - Create a product
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(req: CreateProductRequest) -> Self {
        NewProduct {
            name: req.name,
            image_url: req.image_url,
            price: req.price,
            description: req.description,
            stock_quantity: req.stock_quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateProductResponse {
    pub id: ProductId,
}

/// products.update_stock.v1 and stock.queue_update.v1
#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub product_id: ProductId,
    pub new_quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStockResponse {
    pub product_id: ProductId,
    pub new_quantity: StockQuantity,
    pub updated: bool,
}

/// Acknowledgement for stock.queue_update.v1 (acceptance only, not persistence)
#[derive(Debug, Clone, Serialize)]
pub struct QueueStockUpdateResponse {
    pub product_id: ProductId,
    pub new_quantity: StockQuantity,
    pub status: String,
}
