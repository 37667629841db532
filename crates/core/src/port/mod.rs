// Port Layer - Interfaces for external dependencies

pub mod id_provider; // For deterministic testing
pub mod product_repository;
pub mod stock_scope;
pub mod transaction;

// Re-exports
pub use id_provider::IdProvider;
pub use product_repository::ProductRepository;
pub use stock_scope::{StockScopeFactory, StockUpdateScope};
pub use transaction::{ProductRepositoryTransaction, Transaction, TransactionalProductRepository};
