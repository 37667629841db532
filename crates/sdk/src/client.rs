//! Eshop Client Implementation

use crate::error::{Result, SdkError};
use crate::types::{
    CreateProductRequest, CreateProductResponse, Product, ProductPage, QueueStockUpdateResponse,
    UpdateStockResponse,
};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::ObjectParams;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use std::time::Duration;
use uuid::Uuid;

/// Eshop catalog client
///
/// # Example
///
/// ```no_run
/// use eshop_sdk::EshopClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = EshopClient::connect("http://127.0.0.1:9527").await?;
/// for product in client.list_products().await? {
///     println!("{} x{}", product.name, product.stock_quantity);
/// }
/// # Ok(())
/// # }
/// ```
pub struct EshopClient {
    client: HttpClient,
}

impl EshopClient {
    /// Connect to the Eshop server
    ///
    /// # Arguments
    ///
    /// * `url` - RPC endpoint URL (e.g., `http://127.0.0.1:9527`)
    pub async fn connect(url: impl AsRef<str>) -> Result<Self> {
        let url = url.as_ref();

        let client = HttpClientBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .build(url)
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { client })
    }

    /// All products in display order
    pub async fn list_products(&self) -> Result<Vec<Product>> {
        let response: Vec<Product> = self.client.request("products.list.v1", rpc_params![]).await?;

        Ok(response)
    }

    /// One page of products
    ///
    /// Out-of-range values are normalised by the server (page 1, size 10);
    /// the returned page reports the values actually used.
    pub async fn list_page(
        &self,
        page_number: Option<i64>,
        page_size: Option<i64>,
    ) -> Result<ProductPage> {
        let mut params = ObjectParams::new();
        if let Some(page_number) = page_number {
            params.insert("page_number", page_number)?;
        }
        if let Some(page_size) = page_size {
            params.insert("page_size", page_size)?;
        }
        let response: ProductPage = self.client.request("products.list.v2", params).await?;

        Ok(response)
    }

    /// Get a product; a missing product is an RPC error with the not-found code
    pub async fn get_product(&self, id: Uuid) -> Result<Product> {
        let mut params = ObjectParams::new();
        params.insert("id", id)?;
        let response: Product = self.client.request("products.get.v1", params).await?;

        Ok(response)
    }

    /// Create a product, returning its new id
    pub async fn create_product(&self, request: CreateProductRequest) -> Result<Uuid> {
        let mut params = ObjectParams::new();
        params.insert("name", &request.name)?;
        params.insert("image_url", &request.image_url)?;
        params.insert("price", request.price)?;
        if let Some(description) = &request.description {
            params.insert("description", description)?;
        }
        params.insert("stock_quantity", request.stock_quantity)?;

        let response: CreateProductResponse =
            self.client.request("products.create.v1", params).await?;

        Ok(response.id)
    }

    /// Set stock immediately and wait for the write
    pub async fn update_stock(
        &self,
        product_id: Uuid,
        new_quantity: i64,
    ) -> Result<UpdateStockResponse> {
        let response: UpdateStockResponse = self
            .client
            .request(
                "products.update_stock.v1",
                stock_params(product_id, new_quantity)?,
            )
            .await?;

        Ok(response)
    }

    /// Queue a stock update for the background worker
    ///
    /// Success only means the server accepted the update. Whether it was
    /// applied is not reported back.
    pub async fn queue_stock_update(
        &self,
        product_id: Uuid,
        new_quantity: i64,
    ) -> Result<QueueStockUpdateResponse> {
        let response: QueueStockUpdateResponse = self
            .client
            .request(
                "stock.queue_update.v1",
                stock_params(product_id, new_quantity)?,
            )
            .await?;

        Ok(response)
    }
}

fn stock_params(product_id: Uuid, new_quantity: i64) -> Result<ObjectParams> {
    let mut params = ObjectParams::new();
    params.insert("product_id", product_id)?;
    params.insert("new_quantity", new_quantity)?;
    Ok(params)
}
