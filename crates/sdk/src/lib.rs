//! Eshop SDK - Rust Client Library
//!
//! Provides a convenient client for the Eshop catalog server.
//!
//! # Example
//!
//! ```no_run
//! use eshop_sdk::EshopClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EshopClient::connect("http://127.0.0.1:9527").await?;
//!
//!     let page = client.list_page(Some(1), Some(5)).await?;
//!     let first = &page.items[0];
//!
//!     // Accepted now, applied later by the server's background worker
//!     let ack = client.queue_stock_update(first.id, 42).await?;
//!     println!("{} -> {} ({})", ack.product_id, ack.new_quantity, ack.status);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::EshopClient;
pub use error::{Result, SdkError};
pub use types::{
    CreateProductRequest, CreateProductResponse, Product, ProductPage, QueueStockUpdateResponse,
    UpdateStockResponse,
};
