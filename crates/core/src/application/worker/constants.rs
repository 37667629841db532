// Worker constants
use std::time::Duration;

/// Pending stock updates held before producers are made to wait
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// How long shutdown waits for the in-flight stock update (5 seconds)
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(5);
