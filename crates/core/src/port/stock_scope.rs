// Stock Update Scope Port
// The "apply stock update" capability, opened fresh for every task

use crate::domain::UpdateStockTask;
use crate::error::Result;
use async_trait::async_trait;

/// Isolated unit of work that applies exactly one stock update.
///
/// `apply` consumes the scope: it cannot be reused for a second task, and
/// every resource it holds is released (committed or rolled back) before
/// `apply` returns, whether it succeeds or fails.
#[async_trait]
pub trait StockUpdateScope: Send {
    /// Durably write `task.new_quantity()` for `task.product_id()`.
    ///
    /// # Errors
    /// - AppError::NotFound if the product does not exist
    /// - AppError::Database on storage faults
    async fn apply(self: Box<Self>, task: UpdateStockTask) -> Result<()>;
}

/// Opens a fresh [`StockUpdateScope`] per task
#[async_trait]
pub trait StockScopeFactory: Send + Sync {
    async fn open_scope(&self) -> Result<Box<dyn StockUpdateScope>>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::error::AppError;
    use std::sync::{Arc, Mutex, MutexGuard};
    use std::time::Duration;

    /// Mock scope behavior for a given task
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Apply succeeds
        Success,
        /// Apply fails with message
        Fail(String),
        /// Apply panics with message (for failure isolation testing)
        Panic(String),
    }

    #[derive(Default)]
    struct Ledger {
        attempted: Vec<UpdateStockTask>,
        applied: Vec<UpdateStockTask>,
        opened: usize,
        released: usize,
        max_open: usize,
        rules: Vec<(UpdateStockTask, MockBehavior)>,
        delay: Option<Duration>,
    }

    /// Scope factory that records every task and every scope lifecycle
    #[derive(Clone, Default)]
    pub struct RecordingScopeFactory {
        ledger: Arc<Mutex<Ledger>>,
    }

    impl RecordingScopeFactory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn fail_on(self, task: UpdateStockTask, message: impl Into<String>) -> Self {
            self.lock()
                .rules
                .push((task, MockBehavior::Fail(message.into())));
            self
        }

        pub fn panic_on(self, task: UpdateStockTask, message: impl Into<String>) -> Self {
            self.lock()
                .rules
                .push((task, MockBehavior::Panic(message.into())));
            self
        }

        /// Every apply sleeps this long before finishing
        pub fn with_delay(self, delay: Duration) -> Self {
            self.lock().delay = Some(delay);
            self
        }

        /// Tasks handed to apply, in call order
        pub fn attempted(&self) -> Vec<UpdateStockTask> {
            self.lock().attempted.clone()
        }

        /// Tasks that applied successfully, in call order
        pub fn applied(&self) -> Vec<UpdateStockTask> {
            self.lock().applied.clone()
        }

        pub fn opened(&self) -> usize {
            self.lock().opened
        }

        pub fn released(&self) -> usize {
            self.lock().released
        }

        /// Highest number of scopes alive at the same time
        pub fn max_open(&self) -> usize {
            self.lock().max_open
        }

        fn lock(&self) -> MutexGuard<'_, Ledger> {
            self.ledger.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    #[async_trait]
    impl StockScopeFactory for RecordingScopeFactory {
        async fn open_scope(&self) -> Result<Box<dyn StockUpdateScope>> {
            let mut ledger = self.lock();
            ledger.opened += 1;
            let open = ledger.opened - ledger.released;
            ledger.max_open = ledger.max_open.max(open);
            Ok(Box::new(RecordingScope {
                ledger: Arc::clone(&self.ledger),
            }))
        }
    }

    struct RecordingScope {
        ledger: Arc<Mutex<Ledger>>,
    }

    impl RecordingScope {
        fn lock(&self) -> MutexGuard<'_, Ledger> {
            self.ledger.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
        }
    }

    impl Drop for RecordingScope {
        fn drop(&mut self) {
            self.lock().released += 1;
        }
    }

    #[async_trait]
    impl StockUpdateScope for RecordingScope {
        async fn apply(self: Box<Self>, task: UpdateStockTask) -> Result<()> {
            let delay = {
                let mut ledger = self.lock();
                ledger.attempted.push(task);
                ledger.delay
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }

            let behavior = self
                .lock()
                .rules
                .iter()
                .find(|(t, _)| *t == task)
                .map(|(_, b)| b.clone())
                .unwrap_or(MockBehavior::Success);

            match behavior {
                MockBehavior::Success => {
                    self.lock().applied.push(task);
                    Ok(())
                }
                MockBehavior::Fail(msg) => Err(AppError::Internal(msg)),
                MockBehavior::Panic(msg) => {
                    panic!("{}", msg); // Actually panic for isolation testing
                }
            }
        }
    }
}
