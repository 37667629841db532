// Domain Layer - Pure business logic and entities

pub mod error;
pub mod page;
pub mod product;
pub mod stock_task;

// Re-exports
pub use error::DomainError;
pub use page::PageRequest;
pub use product::{Product, ProductId, StockQuantity};
pub use stock_task::UpdateStockTask;
