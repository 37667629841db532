//! Shared fixtures for the end-to-end tests

use eshop_core::application::CatalogService;
use eshop_core::port::id_provider::UuidProvider;
use eshop_infra_sqlite::{create_pool, run_migrations, SqliteProductRepository};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Catalog wired to a fresh in-memory SQLite database
pub async fn sqlite_catalog() -> (Arc<SqliteProductRepository>, Arc<CatalogService>) {
    catalog_at("sqlite::memory:").await
}

/// Catalog wired to a WAL database file (created if missing)
pub async fn file_catalog(path: &Path) -> (Arc<SqliteProductRepository>, Arc<CatalogService>) {
    catalog_at(&format!("sqlite://{}", path.display())).await
}

async fn catalog_at(database_url: &str) -> (Arc<SqliteProductRepository>, Arc<CatalogService>) {
    let pool = create_pool(database_url).await.unwrap();
    run_migrations(&pool).await.unwrap();

    let repo = Arc::new(SqliteProductRepository::new(pool));
    let catalog = Arc::new(CatalogService::new(
        repo.clone(),
        repo.clone(),
        Arc::new(UuidProvider),
    ));
    (repo, catalog)
}

/// Poll `check` until it returns true or two seconds pass
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while tokio::time::Instant::now() < deadline {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
