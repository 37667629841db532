//! Eshop CLI - Command-line interface for the Eshop catalog server

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:9527";

#[derive(Parser)]
#[command(name = "eshop")]
#[command(about = "Eshop catalog CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// RPC server URL
    #[arg(long, env = "ESHOP_RPC_URL", default_value = DEFAULT_RPC_URL)]
    rpc_url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    List,

    /// List one page of products
    Page {
        /// Page number (values below 1 mean the first page)
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        page: i64,

        /// Page size (1-100, anything else means 10)
        #[arg(short, long, default_value = "10", allow_negative_numbers = true)]
        size: i64,
    },

    /// Show one product
    Get {
        /// Product ID
        id: String,
    },

    /// Create a product
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        image_url: String,

        /// Price as a decimal, e.g. 19.99
        #[arg(short, long)]
        price: String,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        stock: i64,
    },

    /// Set the stock level of a product
    SetStock {
        /// Product ID
        id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,

        /// Hand the update to the background worker instead of waiting for it
        #[arg(long)]
        queued: bool,
    },
}

#[derive(Serialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    method: String,
    params: serde_json::Value,
    id: u64,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[allow(dead_code)]
    jsonrpc: String,
    #[allow(dead_code)]
    id: u64,
    result: Option<serde_json::Value>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i32,
    message: String,
}

#[derive(Deserialize, Tabled)]
struct ProductRow {
    order: i32,
    id: String,
    name: String,
    price: String,
    stock_quantity: u32,
}

#[derive(Deserialize)]
struct PageResult {
    page_number: i64,
    page_size: i64,
    items: Vec<ProductRow>,
}

#[derive(Deserialize, Tabled)]
struct QueueResult {
    product_id: String,
    new_quantity: u32,
    status: String,
}

async fn call_rpc(url: &str, method: &str, params: serde_json::Value) -> Result<serde_json::Value> {
    let request = JsonRpcRequest {
        jsonrpc: "2.0".to_string(),
        method: method.to_string(),
        params,
        id: 1,
    };

    let client = reqwest::Client::new();
    let response: JsonRpcResponse = client
        .post(url)
        .json(&request)
        .send()
        .await
        .context("Failed to connect to server")?
        .json()
        .await
        .context("Failed to parse response")?;

    if let Some(error) = response.error {
        anyhow::bail!("RPC error ({}): {}", error.code, error.message);
    }

    response
        .result
        .ok_or_else(|| anyhow::anyhow!("No result in response"))
}

fn print_products(rows: Vec<ProductRow>) {
    if rows.is_empty() {
        println!("{}", "No products".yellow());
        return;
    }
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List => {
            let result = call_rpc(&cli.rpc_url, "products.list.v1", json!([])).await?;
            let rows: Vec<ProductRow> = serde_json::from_value(result)?;

            println!("{}", format!("{} products", rows.len()).cyan().bold());
            print_products(rows);
        }

        Commands::Page { page, size } => {
            let params = json!({
                "page_number": page,
                "page_size": size,
            });

            let result = call_rpc(&cli.rpc_url, "products.list.v2", params).await?;
            let page: PageResult = serde_json::from_value(result)?;

            println!(
                "{}",
                format!("Page {} (size {})", page.page_number, page.page_size)
                    .cyan()
                    .bold()
            );
            print_products(page.items);
        }

        Commands::Get { id } => {
            let result = call_rpc(&cli.rpc_url, "products.get.v1", json!({ "id": id })).await?;

            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Commands::Create {
            name,
            image_url,
            price,
            description,
            stock,
        } => {
            let params = json!({
                "name": name,
                "image_url": image_url,
                "price": price,
                "description": description,
                "stock_quantity": stock,
            });

            let result = call_rpc(&cli.rpc_url, "products.create.v1", params).await?;
            let id = result["id"].as_str().unwrap_or_default();

            println!("{}", format!("✓ Product {} created", id).green().bold());
        }

        Commands::SetStock {
            id,
            quantity,
            queued,
        } => {
            let params = json!({
                "product_id": id,
                "new_quantity": quantity,
            });

            if queued {
                let result = call_rpc(&cli.rpc_url, "stock.queue_update.v1", params).await?;
                let ack: QueueResult = serde_json::from_value(result)?;

                println!("{}", "✓ Stock update accepted".green().bold());
                println!(
                    "{}",
                    "  (applied in the background, check server logs for the outcome)".dimmed()
                );
                println!();
                println!("{}", Table::new(vec![ack]));
            } else {
                call_rpc(&cli.rpc_url, "products.update_stock.v1", params).await?;

                println!(
                    "{}",
                    format!("✓ Stock of {} set to {}", id, quantity).green().bold()
                );
            }
        }
    }

    Ok(())
}
