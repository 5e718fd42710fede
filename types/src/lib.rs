//! Fundamental types for the Aerial stake ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account addresses, history keys, timestamps and the contract configuration.

pub mod address;
pub mod hash;
pub mod params;
pub mod time;

pub use address::AccountAddress;
pub use hash::HistoryKey;
pub use params::ContractConfig;
pub use time::{Timestamp, SECONDS_PER_DAY, SECONDS_PER_YEAR};
