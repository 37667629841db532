// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Quantity must be zero or greater.")]
    NegativeQuantity(i64),

    #[error("Quantity out of range: {0}")]
    QuantityOutOfRange(i64),
}

pub type Result<T> = std::result::Result<T, DomainError>;
