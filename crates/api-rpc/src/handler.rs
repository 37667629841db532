//! RPC Method Handlers
//!
//! Implements the business logic for each JSON-RPC method.

use crate::error::to_rpc_error;
use crate::types::{
    CreateProductRequest, CreateProductResponse, GetProductRequest, ListPageRequest,
    ListPageResponse, ProductResponse, QueueStockUpdateResponse, UpdateStockRequest,
    UpdateStockResponse,
};
use eshop_core::application::{CatalogService, StockUpdateQueue};
use eshop_core::domain::page::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use eshop_core::domain::product::stock_quantity_from;
use eshop_core::domain::{PageRequest, StockQuantity, UpdateStockTask};
use eshop_core::error::AppError;
use jsonrpsee::types::ErrorObjectOwned;
use std::sync::Arc;
use tracing::info;

/// Status reported for a queued stock update
pub const STATUS_ACCEPTED: &str = "ACCEPTED";

/// RPC Handler with injected dependencies
pub struct RpcHandler {
    catalog: Arc<CatalogService>,
    queue: Arc<StockUpdateQueue>,
}

impl RpcHandler {
    pub fn new(catalog: Arc<CatalogService>, queue: Arc<StockUpdateQueue>) -> Self {
        Self { catalog, queue }
    }

    /// products.list.v1
    pub async fn list_all(&self) -> Result<Vec<ProductResponse>, ErrorObjectOwned> {
        let products = self.catalog.list_all().await.map_err(to_rpc_error)?;
        Ok(products.into_iter().map(ProductResponse::from).collect())
    }

    /// products.list.v2
    pub async fn list_page(
        &self,
        params: ListPageRequest,
    ) -> Result<ListPageResponse, ErrorObjectOwned> {
        let page = PageRequest::normalized(
            params.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );

        let products = self.catalog.list_page(page).await.map_err(to_rpc_error)?;

        Ok(ListPageResponse {
            page_number: page.page_number(),
            page_size: page.page_size(),
            items: products.into_iter().map(ProductResponse::from).collect(),
        })
    }

    /// products.get.v1
    pub async fn get(
        &self,
        params: GetProductRequest,
    ) -> Result<ProductResponse, ErrorObjectOwned> {
        self.catalog
            .get(&params.id)
            .await
            .map_err(to_rpc_error)?
            .map(ProductResponse::from)
            .ok_or_else(|| {
                to_rpc_error(AppError::NotFound(format!("Product {} not found", params.id)))
            })
    }

    /// products.create.v1
    pub async fn create(
        &self,
        params: CreateProductRequest,
    ) -> Result<CreateProductResponse, ErrorObjectOwned> {
        let id = self
            .catalog
            .create(params.into())
            .await
            .map_err(to_rpc_error)?;

        Ok(CreateProductResponse { id })
    }

    /// products.update_stock.v1 (synchronous)
    pub async fn update_stock(
        &self,
        params: UpdateStockRequest,
    ) -> Result<UpdateStockResponse, ErrorObjectOwned> {
        let new_quantity = validated_quantity(params.new_quantity)?;

        let updated = self
            .catalog
            .update_stock(&params.product_id, params.new_quantity)
            .await
            .map_err(to_rpc_error)?;

        if !updated {
            return Err(to_rpc_error(AppError::NotFound(format!(
                "Product {} not found",
                params.product_id
            ))));
        }

        Ok(UpdateStockResponse {
            product_id: params.product_id,
            new_quantity,
            updated,
        })
    }

    /// stock.queue_update.v1
    ///
    /// Waits while the queue is full, then acknowledges acceptance. The
    /// outcome of applying the update is only visible in the server log.
    pub async fn queue_stock_update(
        &self,
        params: UpdateStockRequest,
    ) -> Result<QueueStockUpdateResponse, ErrorObjectOwned> {
        let new_quantity = validated_quantity(params.new_quantity)?;
        let task = UpdateStockTask::new(params.product_id, new_quantity);

        self.queue.enqueue(task).await.map_err(to_rpc_error)?;

        info!(
            product_id = %params.product_id,
            new_quantity,
            "Stock update queued"
        );

        Ok(QueueStockUpdateResponse {
            product_id: params.product_id,
            new_quantity,
            status: STATUS_ACCEPTED.to_string(),
        })
    }
}

fn validated_quantity(raw: i64) -> Result<StockQuantity, ErrorObjectOwned> {
    stock_quantity_from(raw).map_err(|e| to_rpc_error(AppError::Domain(e)))
}
