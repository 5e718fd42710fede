//! Hashing primitives for the Aerial stake ledger.
//!
//! Hashing here only derives storage keys. Nothing in the ledger signs or
//! authenticates with these digests.

pub mod hash;

pub use hash::{derive_history_key, sha256, sha256_multi, HISTORY_DOMAIN_TAG};
