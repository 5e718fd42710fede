//! Key/value ledger store trait.

use crate::StoreError;

/// The key/value store a ledger host hands to the contract for one transaction.
///
/// Reads must observe earlier writes of the same transaction. Atomicity is
/// provided by the host across the whole transaction, never per call: the
/// contract issues its writes in order and relies on the host to discard all
/// of them if the invocation fails.
///
/// An absent key is `Ok(None)`, not an error.
pub trait LedgerStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
    fn delete(&self, key: &[u8]) -> Result<(), StoreError>;

    /// Whether a value is stored under `key`.
    fn exists(&self, key: &[u8]) -> Result<bool, StoreError> {
        self.get(key).map(|v| v.is_some())
    }
}
