// Eshop Infrastructure - SQLite Adapter
// Implements: ProductRepository, TransactionalProductRepository

mod connection;
mod error;
mod migration;
mod product_repository;
mod transaction;

pub use connection::create_pool;
pub use migration::run_migrations;
pub use product_repository::SqliteProductRepository;
pub use transaction::SqliteProductTransaction;

// Note: sqlx::Error conversion is handled by wrapping in helper functions
// due to Rust's orphan rules (cannot implement From<sqlx::Error> for AppError here)
