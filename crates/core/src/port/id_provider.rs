// ID Provider Port (for deterministic testing)

use crate::domain::ProductId;

/// ID provider interface (allows deterministic IDs in tests)
pub trait IdProvider: Send + Sync {
    /// Generate a new unique product ID
    fn generate_id(&self) -> ProductId;
}

/// UUID v4 provider (production)
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn generate_id(&self) -> ProductId {
        uuid::Uuid::new_v4()
    }
}

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Hands out 00000000-0000-0000-0000-000000000001, ...0002, ...
    #[derive(Default)]
    pub struct SequentialIdProvider {
        next: AtomicU64,
    }

    impl IdProvider for SequentialIdProvider {
        fn generate_id(&self) -> ProductId {
            let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
            uuid::Uuid::from_u128(u128::from(n))
        }
    }
}
