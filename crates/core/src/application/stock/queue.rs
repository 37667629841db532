// Stock Update Queue - bounded FIFO hand-off between producers and the worker

use crate::application::worker::ShutdownToken;
use crate::domain::UpdateStockTask;
use crate::error::{AppError, Result};
use tokio::sync::{mpsc, Mutex};

/// Bounded, thread-safe FIFO of pending stock updates.
///
/// Any number of producers may call [`enqueue`](Self::enqueue) concurrently.
/// When the queue is full, producers wait for a free slot instead of failing
/// or dropping the task. Consumers take tasks with
/// [`dequeue`](Self::dequeue); the receiving end sits behind a mutex so that
/// concurrent consumers each get a distinct task and FIFO order is kept.
///
/// Enqueueing only acknowledges acceptance. Whether the update is later
/// applied is not reported back to the producer.
pub struct StockUpdateQueue {
    sender: mpsc::Sender<UpdateStockTask>,
    receiver: Mutex<mpsc::Receiver<UpdateStockTask>>,
}

impl StockUpdateQueue {
    /// Create a queue holding at most `capacity` pending tasks
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(AppError::Config(
                "stock update queue capacity must be at least 1".to_string(),
            ));
        }
        let (sender, receiver) = mpsc::channel(capacity);
        Ok(Self {
            sender,
            receiver: Mutex::new(receiver),
        })
    }

    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }

    /// Append a task at the tail, waiting while the queue is full.
    ///
    /// Cancel-safe: dropping the returned future before it completes
    /// abandons the enqueue and leaves the queue untouched.
    pub async fn enqueue(&self, task: UpdateStockTask) -> Result<()> {
        self.sender
            .send(task)
            .await
            .map_err(|_| AppError::QueueClosed)
    }

    /// Remove and return the head task, waiting while the queue is empty.
    ///
    /// Returns `None` once `shutdown` fires. Shutdown takes precedence over
    /// pending tasks, which are left in place.
    pub async fn dequeue(&self, shutdown: &mut ShutdownToken) -> Option<UpdateStockTask> {
        if shutdown.is_shutdown() {
            return None;
        }

        let mut receiver = tokio::select! {
            biased;
            _ = shutdown.wait() => return None,
            guard = self.receiver.lock() => guard,
        };

        tokio::select! {
            biased;
            _ = shutdown.wait() => None,
            task = receiver.recv() => task,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::worker::shutdown_channel;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::task::JoinSet;
    use tokio_test::{assert_pending, assert_ready_ok};
    use uuid::Uuid;

    fn task(n: u128, qty: u32) -> UpdateStockTask {
        UpdateStockTask::new(Uuid::from_u128(n), qty)
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(StockUpdateQueue::new(0), Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = StockUpdateQueue::new(10).unwrap();
        let (_tx, mut shutdown) = shutdown_channel();

        for i in 0..5 {
            queue.enqueue(task(1, i)).await.unwrap();
        }

        for i in 0..5 {
            let next = queue.dequeue(&mut shutdown).await.unwrap();
            assert_eq!(next.new_quantity(), i);
        }
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let queue = StockUpdateQueue::new(4).unwrap();
        let (_tx, mut shutdown) = shutdown_channel();

        queue.enqueue(task(7, 3)).await.unwrap();
        queue.enqueue(task(7, 3)).await.unwrap();

        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(7, 3)));
        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(7, 3)));
    }

    #[tokio::test]
    async fn test_enqueue_waits_when_full() {
        let queue = StockUpdateQueue::new(2).unwrap();
        let (_tx, mut shutdown) = shutdown_channel();

        queue.enqueue(task(1, 1)).await.unwrap();
        queue.enqueue(task(2, 2)).await.unwrap();

        // Third enqueue must suspend, not error or drop
        let mut blocked = tokio_test::task::spawn(queue.enqueue(task(3, 3)));
        assert_pending!(blocked.poll());

        // Freeing a slot wakes the producer
        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(1, 1)));
        assert!(blocked.is_woken());
        assert_ready_ok!(blocked.poll());
        drop(blocked);

        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(2, 2)));
        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(3, 3)));
    }

    #[tokio::test]
    async fn test_cancelled_enqueue_leaves_queue_consistent() {
        let queue = StockUpdateQueue::new(1).unwrap();
        let (_tx, mut shutdown) = shutdown_channel();

        queue.enqueue(task(1, 1)).await.unwrap();
        let timed_out =
            tokio::time::timeout(Duration::from_millis(20), queue.enqueue(task(2, 2))).await;
        assert!(timed_out.is_err());

        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(1, 1)));
        queue.enqueue(task(3, 3)).await.unwrap();
        assert_eq!(queue.dequeue(&mut shutdown).await, Some(task(3, 3)));
    }

    #[tokio::test]
    async fn test_dequeue_cancelled_by_shutdown() {
        let queue = Arc::new(StockUpdateQueue::new(4).unwrap());
        let (tx, mut shutdown) = shutdown_channel();

        let waiter = {
            let queue = Arc::clone(&queue);
            tokio::spawn(async move { queue.dequeue(&mut shutdown).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.shutdown();

        let result = tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("dequeue should return promptly after shutdown")
            .unwrap();
        assert!(result.is_none());

        // Queue still usable afterwards
        let (_tx2, mut fresh) = shutdown_channel();
        queue.enqueue(task(1, 1)).await.unwrap();
        assert_eq!(queue.dequeue(&mut fresh).await, Some(task(1, 1)));
    }

    #[tokio::test]
    async fn test_shutdown_takes_precedence_over_pending_tasks() {
        let queue = StockUpdateQueue::new(4).unwrap();
        let (tx, mut shutdown) = shutdown_channel();

        queue.enqueue(task(1, 1)).await.unwrap();
        tx.shutdown();

        assert!(queue.dequeue(&mut shutdown).await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_producers_no_loss() {
        let queue = Arc::new(StockUpdateQueue::new(8).unwrap());
        let (_tx, mut shutdown) = shutdown_channel();

        let mut producers = JoinSet::new();
        for producer in 0..10u128 {
            let queue = Arc::clone(&queue);
            producers.spawn(async move {
                for i in 0..20 {
                    queue.enqueue(task(producer, i)).await.unwrap();
                }
            });
        }

        let mut received = Vec::new();
        while received.len() < 200 {
            received.push(queue.dequeue(&mut shutdown).await.unwrap());
        }
        while let Some(result) = producers.join_next().await {
            result.unwrap();
        }

        // Per-producer order is preserved
        for producer in 0..10u128 {
            let quantities: Vec<u32> = received
                .iter()
                .filter(|t| t.product_id() == Uuid::from_u128(producer))
                .map(|t| t.new_quantity())
                .collect();
            assert_eq!(quantities, (0..20).collect::<Vec<_>>());
        }
    }

    #[tokio::test]
    async fn test_concurrent_consumers_get_distinct_tasks() {
        let queue = Arc::new(StockUpdateQueue::new(64).unwrap());
        let (tx, shutdown) = shutdown_channel();

        for i in 0..50 {
            queue.enqueue(task(1, i)).await.unwrap();
        }

        let mut consumers = JoinSet::new();
        for _ in 0..4 {
            let queue = Arc::clone(&queue);
            let mut shutdown = shutdown.clone();
            consumers.spawn(async move {
                let mut seen = Vec::new();
                while let Some(t) = queue.dequeue(&mut shutdown).await {
                    seen.push(t.new_quantity());
                }
                seen
            });
        }

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.shutdown();

        let mut all = Vec::new();
        while let Some(result) = consumers.join_next().await {
            let seen = result.unwrap();
            // Each consumer observes increasing quantities
            assert!(seen.windows(2).all(|w| w[0] < w[1]));
            all.extend(seen);
        }
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }
}
