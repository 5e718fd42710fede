//! Abstract storage trait for the Aerial stake ledger.
//!
//! Every storage backend (LMDB, in-memory for testing) implements
//! [`LedgerStore`]. The rest of the codebase depends only on the trait.

pub mod error;
pub mod ledger;

pub use error::StoreError;
pub use ledger::LedgerStore;
