//! JSON-RPC Server
//!
//! Serves the catalog API over HTTP/WebSocket on a TCP address.

use crate::handler::RpcHandler;
use crate::types::{
    CreateProductRequest, GetProductRequest, ListPageRequest, UpdateStockRequest,
};
use eshop_core::application::{CatalogService, StockUpdateQueue};
use jsonrpsee::server::{Server, ServerHandle};
use jsonrpsee::RpcModule;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_RPC_HOST: &str = "127.0.0.1";
pub const DEFAULT_RPC_PORT: u16 = 9527;

/// RPC Server Configuration
#[derive(Debug, Clone)]
pub struct RpcServerConfig {
    pub host: String,
    /// 0 binds an ephemeral port, see [`RpcServer::start`]
    pub port: u16,
}

impl Default for RpcServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_RPC_HOST.to_string(),
            port: DEFAULT_RPC_PORT,
        }
    }
}

/// RPC Server
pub struct RpcServer {
    config: RpcServerConfig,
    handler: Arc<RpcHandler>,
}

impl RpcServer {
    pub fn new(
        config: RpcServerConfig,
        catalog: Arc<CatalogService>,
        queue: Arc<StockUpdateQueue>,
    ) -> Self {
        Self {
            config,
            handler: Arc::new(RpcHandler::new(catalog, queue)),
        }
    }

    /// Start the JSON-RPC server
    ///
    /// Returns the bound address (the real port when configured with 0) and
    /// the handle used to stop the server.
    pub async fn start(self) -> Result<(SocketAddr, ServerHandle), String> {
        let addr = format!("{}:{}", self.config.host, self.config.port);

        info!(
            host = %self.config.host,
            port = %self.config.port,
            "Starting JSON-RPC server"
        );

        let server = Server::builder()
            .build(&addr)
            .await
            .map_err(|e| format!("Failed to build server on {}: {}", addr, e))?;
        let local_addr = server
            .local_addr()
            .map_err(|e| format!("Failed to read bound address: {}", e))?;

        let mut module = RpcModule::new(());

        let handler = self.handler.clone();
        module
            .register_async_method("products.list.v1", move |_, _, _| {
                let handler = handler.clone();
                async move { handler.list_all().await }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("products.list.v2", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: Option<ListPageRequest> = params.parse()?;
                    handler.list_page(req.unwrap_or_default()).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("products.get.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: GetProductRequest = params.parse()?;
                    handler.get(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("products.create.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: CreateProductRequest = params.parse()?;
                    handler.create(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("products.update_stock.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: UpdateStockRequest = params.parse()?;
                    handler.update_stock(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        let handler = self.handler.clone();
        module
            .register_async_method("stock.queue_update.v1", move |params, _, _| {
                let handler = handler.clone();
                async move {
                    let req: UpdateStockRequest = params.parse()?;
                    handler.queue_stock_update(req).await
                }
            })
            .map_err(|e| e.to_string())?;

        info!(addr = %local_addr, "JSON-RPC server started successfully");

        let handle = server.start(module);
        Ok((local_addr, handle))
    }
}
