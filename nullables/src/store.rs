//! Nullable store: thread-safe in-memory ledger store for testing.

use aerial_store::{LedgerStore, StoreError};
use std::collections::BTreeMap;
use std::sync::Mutex;

/// An in-memory ledger store for testing.
///
/// A single map serves all reads and writes, so reads always observe earlier
/// writes. Failures can be injected to exercise the contract's error paths:
/// [`NullStore::fail_reads`] makes every `get` fail, and
/// [`NullStore::fail_writes_after`] lets `n` more writes succeed before every
/// subsequent `put`/`delete` fails.
pub struct NullStore {
    entries: Mutex<BTreeMap<Vec<u8>, Vec<u8>>>,
    fail_reads: Mutex<bool>,
    writes_before_failure: Mutex<Option<usize>>,
    write_count: Mutex<usize>,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            fail_reads: Mutex::new(false),
            writes_before_failure: Mutex::new(None),
            write_count: Mutex::new(0),
        }
    }

    /// Make every subsequent `get` fail with a backend error.
    pub fn fail_reads(&self) {
        *self.fail_reads.lock().unwrap() = true;
    }

    /// Allow `n` more writes, then fail every `put`/`delete`.
    pub fn fail_writes_after(&self, n: usize) {
        *self.writes_before_failure.lock().unwrap() = Some(n);
    }

    /// Clear all injected failures.
    pub fn heal(&self) {
        *self.fail_reads.lock().unwrap() = false;
        *self.writes_before_failure.lock().unwrap() = None;
    }

    /// Number of successful `put`/`delete` calls so far.
    pub fn write_count(&self) -> usize {
        *self.write_count.lock().unwrap()
    }

    /// Copy of every stored entry, for before/after comparisons.
    pub fn snapshot(&self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    fn check_write(&self) -> Result<(), StoreError> {
        let mut budget = self.writes_before_failure.lock().unwrap();
        match budget.as_mut() {
            Some(0) => Err(StoreError::Backend("injected write failure".into())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for NullStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        if *self.fail_reads.lock().unwrap() {
            return Err(StoreError::Backend("injected read failure".into()));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_write()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_vec(), value.to_vec());
        *self.write_count.lock().unwrap() += 1;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.check_write()?;
        self.entries.lock().unwrap().remove(key);
        *self.write_count.lock().unwrap() += 1;
        Ok(())
    }
}
