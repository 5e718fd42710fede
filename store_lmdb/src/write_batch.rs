//! Write batching: one LMDB write transaction per contract invocation.
//!
//! # Usage
//!
//! ```ignore
//! let batch = env.write_batch()?;
//! contract.invoke(&batch, &invocation, now)?;
//! batch.commit()?;
//! ```
//!
//! If the batch is dropped without calling [`WriteBatch::commit`], all
//! operations are rolled back (the underlying LMDB transaction is aborted).
//! Reads issued through the batch observe its own uncommitted writes.

use std::cell::RefCell;

use heed::types::Bytes;
use heed::{Database, RwTxn};

use aerial_store::{LedgerStore, StoreError};

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

/// A ledger store view backed by a single open LMDB write transaction.
pub struct WriteBatch<'a> {
    txn: RefCell<RwTxn<'a>>,
    db: Database<Bytes, Bytes>,
}

impl<'a> WriteBatch<'a> {
    /// Begin a new write batch.
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, LmdbError> {
        let txn = env.env().write_txn()?;
        Ok(Self {
            txn: RefCell::new(txn),
            db: env.ledger_db,
        })
    }

    /// Commit every write of this batch atomically.
    pub fn commit(self) -> Result<(), LmdbError> {
        self.txn.into_inner().commit()?;
        Ok(())
    }

    /// Discard every write of this batch. Equivalent to dropping it.
    pub fn abort(self) {
        self.txn.into_inner().abort();
    }
}

impl LedgerStore for WriteBatch<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let txn = self.txn.borrow();
        let value = self.db.get(&*txn, key).map_err(LmdbError::from)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let mut txn = self.txn.borrow_mut();
        self.db
            .put(&mut *txn, key, value)
            .map_err(LmdbError::from)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        let mut txn = self.txn.borrow_mut();
        self.db.delete(&mut *txn, key).map_err(LmdbError::from)?;
        Ok(())
    }
}
