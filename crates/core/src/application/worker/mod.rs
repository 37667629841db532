// Worker - Stock update consumer loop

pub mod constants;
mod shutdown;

pub use shutdown::{shutdown_channel, ShutdownSender, ShutdownToken};

use crate::application::stock::StockUpdateQueue;
use crate::domain::UpdateStockTask;
use crate::port::StockScopeFactory;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Lifecycle of the worker loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Running,
    Stopped,
}

/// Result of handling one dequeued task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Applied,
    Failed,
}

/// Single background consumer of the stock update queue.
///
/// Tasks are applied one at a time in dequeue order, each through a freshly
/// opened scope. A failing task is logged and dropped (no retry); it never
/// stops the loop.
pub struct StockUpdateWorker {
    queue: Arc<StockUpdateQueue>,
    scopes: Arc<dyn StockScopeFactory>,
    running: AtomicBool,
}

impl StockUpdateWorker {
    pub fn new(queue: Arc<StockUpdateQueue>, scopes: Arc<dyn StockScopeFactory>) -> Self {
        Self {
            queue,
            scopes,
            running: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> WorkerState {
        if self.running.load(Ordering::Acquire) {
            WorkerState::Running
        } else {
            WorkerState::Stopped
        }
    }

    /// Run worker loop until `shutdown` fires.
    ///
    /// A task already dequeued when the signal arrives is finished first;
    /// tasks still queued are abandoned. Returns at once if this worker is
    /// already running, so there is never more than one consumer.
    pub async fn run(&self, mut shutdown: ShutdownToken) {
        if self.running.swap(true, Ordering::AcqRel) {
            warn!("Stock update worker already running");
            return;
        }
        info!(capacity = self.queue.capacity(), "Stock update worker started");

        let mut applied: u64 = 0;
        let mut failed: u64 = 0;

        while let Some(task) = self.queue.dequeue(&mut shutdown).await {
            match self.process(task).await {
                TaskOutcome::Applied => applied += 1,
                TaskOutcome::Failed => failed += 1,
            }
        }

        self.running.store(false, Ordering::Release);
        info!(applied, failed, "Stock update worker stopped");
    }

    /// Apply one task through its own scope and log the outcome
    pub async fn process(&self, task: UpdateStockTask) -> TaskOutcome {
        let product_id = task.product_id();
        let new_quantity = task.new_quantity();
        let scopes = Arc::clone(&self.scopes);

        // Spawned so a panicking scope is caught by the JoinHandle.
        // Awaited here, so the scope is released before the next dequeue.
        let handle = tokio::task::spawn(async move {
            let scope = scopes.open_scope().await?;
            scope.apply(task).await
        });

        match handle.await {
            Ok(Ok(())) => {
                info!(
                    product_id = %product_id,
                    new_quantity,
                    "Background stock update successful"
                );
                TaskOutcome::Applied
            }
            Ok(Err(e)) => {
                error!(
                    product_id = %product_id,
                    new_quantity,
                    error = %e,
                    "Error processing stock update"
                );
                TaskOutcome::Failed
            }
            Err(join_err) => {
                if join_err.is_panic() {
                    error!(
                        product_id = %product_id,
                        new_quantity,
                        "Stock update panicked: {:?}",
                        join_err
                    );
                } else {
                    error!(
                        product_id = %product_id,
                        new_quantity,
                        "Stock update cancelled: {:?}",
                        join_err
                    );
                }
                TaskOutcome::Failed
            }
        }
    }
}
