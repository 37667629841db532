// Application Layer - Use Cases and Business Logic

pub mod catalog;
pub mod stock;
pub mod worker;

// Re-exports
pub use catalog::CatalogService;
pub use stock::{StockUpdateQueue, TransactionalScopeFactory};
pub use worker::{shutdown_channel, ShutdownSender, ShutdownToken, StockUpdateWorker};
