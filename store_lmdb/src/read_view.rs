//! Read-only ledger view over an LMDB read transaction.

use heed::types::Bytes;
use heed::{Database, RoTxn};

use aerial_store::{LedgerStore, StoreError};

use crate::environment::LmdbEnvironment;
use crate::LmdbError;

/// A consistent snapshot of the ledger for queries. Writes are rejected.
pub struct ReadView<'a> {
    txn: RoTxn<'a>,
    db: Database<Bytes, Bytes>,
}

impl<'a> ReadView<'a> {
    pub(crate) fn new(env: &'a LmdbEnvironment) -> Result<Self, LmdbError> {
        let txn = env.env().read_txn()?;
        Ok(Self {
            txn,
            db: env.ledger_db,
        })
    }
}

impl LedgerStore for ReadView<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        let value = self.db.get(&self.txn, key).map_err(LmdbError::from)?;
        Ok(value.map(|v| v.to_vec()))
    }

    fn put(&self, _key: &[u8], _value: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Backend("write through a read-only view".into()))
    }

    fn delete(&self, _key: &[u8]) -> Result<(), StoreError> {
        Err(StoreError::Backend("write through a read-only view".into()))
    }
}
