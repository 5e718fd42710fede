//! Stake-engine errors.

use aerial_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StakeError {
    #[error("failed to encode stake history: {0}")]
    Serialization(String),

    #[error("stake history is corrupted: {0}")]
    Corruption(String),

    #[error("arithmetic overflow in stake computation")]
    Overflow,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
