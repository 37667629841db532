//! SDK Request/Response Types
//!
//! Mirrors the JSON-RPC types from the api-rpc crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub stock_quantity: u32,
    pub order: i32,
}

/// Response from products.list.v2 (page values as normalised by the server)
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPage {
    pub page_number: i64,
    pub page_size: i64,
    pub items: Vec<Product>,
}

/// Request to create a product
#[derive(Debug, Clone, Serialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub image_url: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub stock_quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductResponse {
    pub id: Uuid,
}

/// Response from the synchronous stock update
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStockResponse {
    pub product_id: Uuid,
    pub new_quantity: u32,
    pub updated: bool,
}

/// Acknowledgement of a queued stock update
#[derive(Debug, Clone, Deserialize)]
pub struct QueueStockUpdateResponse {
    pub product_id: Uuid,
    pub new_quantity: u32,
    pub status: String,
}
