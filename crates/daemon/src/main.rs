//! Eshop Server - Main Entry Point
//! JSON-RPC catalog API + background stock update worker

mod logging;
mod settings;

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

use eshop_api_rpc::{RpcServer, RpcServerConfig};
use eshop_core::application::catalog::seed::DEFAULT_SEED_COUNT;
use eshop_core::application::{
    shutdown_channel, CatalogService, StockUpdateQueue, StockUpdateWorker,
    TransactionalScopeFactory,
};
use eshop_core::port::id_provider::UuidProvider;
use eshop_infra_sqlite::{create_pool, run_migrations, SqliteProductRepository};
use settings::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize logging
    let _log_guard = logging::init_logging()?;

    info!("Eshop server v{} starting...", VERSION);

    // 2. Load configuration
    let settings = Settings::load()?;

    // 3. Initialize database
    if !settings.is_in_memory() {
        if let Some(parent) = Path::new(&settings.db_path).parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create {}", parent.display()))?;
        }
    }
    info!(db_path = %settings.db_path, "Initializing database...");

    let pool = create_pool(&settings.db_path)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    // 4. Setup dependencies (DI wiring)
    let product_repo = Arc::new(SqliteProductRepository::new(pool.clone()));
    let catalog = Arc::new(CatalogService::new(
        product_repo.clone(),
        product_repo.clone(),
        Arc::new(UuidProvider),
    ));

    if settings.seed_demo_data {
        let seeded = catalog
            .seed_if_empty(DEFAULT_SEED_COUNT)
            .await
            .context("Seeding demo catalog failed")?;
        info!(seeded, "Demo data check completed");
    }

    let queue = Arc::new(StockUpdateQueue::new(settings.queue_capacity)?);

    // 5. Start JSON-RPC server
    let rpc_config = RpcServerConfig {
        host: settings.rpc_host.clone(),
        port: settings.rpc_port,
    };
    let rpc_server = RpcServer::new(rpc_config, catalog.clone(), queue.clone());
    let (rpc_addr, rpc_handle) = rpc_server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("RPC server start failed: {}", e))?;

    // 6. Start stock update worker
    info!("Starting worker...");
    let (shutdown_tx, shutdown_rx) = shutdown_channel();

    let worker = StockUpdateWorker::new(
        queue,
        Arc::new(TransactionalScopeFactory::new(product_repo)),
    );
    let worker_handle = tokio::spawn(async move {
        worker.run(shutdown_rx).await;
    });

    info!(addr = %rpc_addr, "System ready. Press Ctrl+C to shutdown");

    // 7. Wait for shutdown signal
    tokio::signal::ctrl_c().await?;

    info!("Shutdown signal received. Exiting gracefully...");

    // 8. Graceful shutdown: stop producers first, then the worker
    rpc_handle
        .stop()
        .map_err(|e| anyhow::anyhow!("RPC server stop failed: {}", e))?;
    rpc_handle.stopped().await;

    shutdown_tx.shutdown();
    if tokio::time::timeout(settings.shutdown_grace(), worker_handle)
        .await
        .is_err()
    {
        warn!(
            grace_secs = settings.shutdown_grace_secs,
            "Worker did not stop within grace period"
        );
    }

    pool.close().await;
    info!("Shutdown complete.");

    Ok(())
}
