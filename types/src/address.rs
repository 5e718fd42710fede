//! Account address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque account identifier.
///
/// The address string is also the ledger key under which the account's
/// balance lives, so the `__` prefix is reserved for contract metadata.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountAddress(String);

impl AccountAddress {
    /// Prefix reserved for contract metadata keys (`__config`, `__totalSupply`).
    pub const RESERVED_PREFIX: &'static str = "__";

    /// Parse an address, rejecting empty strings and the reserved namespace.
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let s = raw.into();
        if s.is_empty() || s.starts_with(Self::RESERVED_PREFIX) {
            return None;
        }
        Some(Self(s))
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The ledger key holding this account's balance.
    pub fn balance_key(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
