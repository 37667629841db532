// Stock update pipeline: producer-side queue and per-task scopes

pub mod queue;
pub mod scope;

pub use queue::StockUpdateQueue;
pub use scope::TransactionalScopeFactory;
