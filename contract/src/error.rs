//! Contract errors.

use aerial_stake::StakeError;
use aerial_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContractError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("supply cap exceeded: supply {current} + reward {reward} > cap {max}")]
    SupplyCapExceeded { current: u128, reward: u128, max: u128 },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("ledger data is corrupted: {0}")]
    Corruption(String),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("contract is not initialized")]
    NotInitialized,

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ContractError {
    /// Whether the host must abort the whole transaction.
    ///
    /// Store failures may leave some of the invocation's writes applied and
    /// others not; only the host's transaction boundary can discard them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ContractError::Store(_))
    }
}

impl From<StakeError> for ContractError {
    fn from(e: StakeError) -> Self {
        match e {
            StakeError::Serialization(msg) => ContractError::Serialization(msg),
            StakeError::Corruption(msg) => ContractError::Corruption(msg),
            StakeError::Overflow => ContractError::Overflow,
            StakeError::Store(e) => ContractError::Store(e),
        }
    }
}
