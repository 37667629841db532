//! Synchronous and queued stock writes racing on a WAL database file

use eshop_core::application::worker::{TaskOutcome, WorkerState};
use eshop_core::application::{
    shutdown_channel, CatalogService, StockUpdateQueue, StockUpdateWorker,
    TransactionalScopeFactory,
};
use eshop_core::domain::{ProductId, UpdateStockTask};
use eshop_core::port::ProductRepository;
use eshop_infra_sqlite::SqliteProductRepository;
use eshop_integration_tests::{eventually, file_catalog};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinSet;

const WRITERS: i64 = 4;
const WRITES_PER_WRITER: i64 = 100;
const QUEUED_WRITES: u32 = 200;

/// Database file removed (with its WAL side files) on drop
struct TempDb(PathBuf);

impl TempDb {
    fn new() -> Self {
        let name = format!("eshop_concurrent_{}.db", uuid::Uuid::new_v4());
        Self(std::env::temp_dir().join(name))
    }

    fn path(&self) -> &Path {
        &self.0
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.0.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

async fn stock_of(repo: &SqliteProductRepository, id: &ProductId) -> u32 {
    repo.find_by_id(id).await.unwrap().unwrap().stock_quantity
}

async fn setup(
    db: &TempDb,
) -> (Arc<SqliteProductRepository>, Arc<CatalogService>, Vec<ProductId>) {
    let (repo, catalog) = file_catalog(db.path()).await;
    catalog.seed_if_empty(3).await.unwrap();
    let ids = catalog.list_all().await.unwrap().into_iter().map(|p| p.id).collect();
    (repo, catalog, ids)
}

fn spawn_sync_writers(catalog: &Arc<CatalogService>, id: ProductId) -> JoinSet<()> {
    let mut writers = JoinSet::new();
    for w in 0..WRITERS {
        let catalog = Arc::clone(catalog);
        writers.spawn(async move {
            for n in 0..WRITES_PER_WRITER {
                let updated = catalog.update_stock(&id, w * 1000 + n).await;
                assert!(matches!(updated, Ok(true)), "sync write failed: {:?}", updated);
            }
        });
    }
    writers
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_worker_and_sync_writes_all_apply() {
    let db = TempDb::new();
    let (repo, catalog, ids) = setup(&db).await;
    let (background, contended) = (ids[0], ids[1]);

    let queue = Arc::new(StockUpdateQueue::new(16).unwrap());
    let worker = StockUpdateWorker::new(
        queue,
        Arc::new(TransactionalScopeFactory::new(repo.clone())),
    );

    let mut writers = spawn_sync_writers(&catalog, contended);

    let mut failed = 0;
    for i in 0..QUEUED_WRITES {
        if worker.process(UpdateStockTask::new(background, i)).await == TaskOutcome::Failed {
            failed += 1;
        }
    }

    while let Some(joined) = writers.join_next().await {
        joined.unwrap();
    }

    assert_eq!(failed, 0);
    assert_eq!(stock_of(&repo, &background).await, QUEUED_WRITES - 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_queued_updates_land_under_contention() {
    let db = TempDb::new();
    let (repo, catalog, ids) = setup(&db).await;
    let (background, contended) = (ids[0], ids[1]);

    let queue = Arc::new(StockUpdateQueue::new(8).unwrap());
    let worker = Arc::new(StockUpdateWorker::new(
        queue.clone(),
        Arc::new(TransactionalScopeFactory::new(repo.clone())),
    ));
    let (tx, shutdown) = shutdown_channel();

    let running = worker.clone();
    let handle = tokio::spawn(async move { running.run(shutdown).await });

    let mut writers = spawn_sync_writers(&catalog, contended);

    // Reads of the contended product run between the enqueues
    for i in 0..QUEUED_WRITES {
        queue.enqueue(UpdateStockTask::new(background, i)).await.unwrap();
        assert!(catalog.get(&contended).await.unwrap().is_some());
    }

    while let Some(joined) = writers.join_next().await {
        joined.unwrap();
    }

    let last = QUEUED_WRITES - 1;
    let repo_ref = repo.as_ref();
    assert!(eventually(|| async move { stock_of(repo_ref, &background).await == last }).await);
    assert_eq!(worker.state(), WorkerState::Running);

    tx.shutdown();
    handle.await.unwrap();
}
