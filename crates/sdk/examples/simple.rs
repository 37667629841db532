//! Simple SDK Example
//!
//! Demonstrates basic usage of the Eshop SDK.
//!
//! # Usage
//!
//! 1. Start the server:
//!    ```bash
//!    cargo run --package eshop-daemon
//!    ```
//!
//! 2. Run this example:
//!    ```bash
//!    cargo run --package eshop-sdk --example simple
//!    ```

use eshop_sdk::{CreateProductRequest, EshopClient};
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Eshop SDK - Simple Example");
    println!("==========================\n");

    // 1. Connect to server
    println!("1. Connecting to server...");
    let client = EshopClient::connect("http://127.0.0.1:9527").await?;
    println!("   ✓ Connected\n");

    // 2. Create a product
    println!("2. Creating a product...");
    let id = client
        .create_product(CreateProductRequest {
            name: "Example Lamp".to_string(),
            image_url: "https://picsum.photos/seed/lamp/200".to_string(),
            price: Decimal::new(4999, 2),
            description: Some("Created by the SDK example".to_string()),
            stock_quantity: 3,
        })
        .await?;
    println!("   ✓ Created {}\n", id);

    // 3. Queue a stock update
    println!("3. Queueing stock update to 12...");
    let ack = client.queue_stock_update(id, 12).await?;
    println!("   ✓ {}\n", ack.status);

    // 4. Give the worker a moment, then read back
    println!("4. Waiting 1 second...");
    tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
    let product = client.get_product(id).await?;
    println!("   ✓ {} now has stock {}\n", product.name, product.stock_quantity);

    // 5. First page of the catalog
    println!("5. Listing first page...");
    let page = client.list_page(Some(1), Some(5)).await?;
    for p in &page.items {
        println!("     #{:<3} {:<20} {:>10} x{}", p.order, p.name, p.price, p.stock_quantity);
    }

    println!("\n✓ Example completed successfully!");

    Ok(())
}
