//! SHA-256 hashing and stake-history key derivation.

use aerial_types::{AccountAddress, HistoryKey};
use sha2::{Digest, Sha256};

/// Domain tag appended to the address before hashing.
pub const HISTORY_DOMAIN_TAG: &[u8] = b"transferIn";

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn sha256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Derive the ledger key of an account's stake history log.
///
/// `SHA-256(address ++ "transferIn")`, no salt, stable across restarts.
pub fn derive_history_key(address: &AccountAddress) -> HistoryKey {
    HistoryKey::new(sha256_multi(&[address.as_str().as_bytes(), HISTORY_DOMAIN_TAG]))
}
