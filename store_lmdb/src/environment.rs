//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::read_view::ReadView;
use crate::write_batch::WriteBatch;
use crate::LmdbError;

/// Name of the single database holding every ledger key.
const LEDGER_DB: &str = "ledger";

/// Wraps the LMDB environment and the ledger database handle.
pub struct LmdbEnvironment {
    env: Env,
    pub(crate) ledger_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened once per process and the
        // directory is not shared with another open `Env` in this process.
        let env = unsafe { EnvOpenOptions::new().map_size(map_size).max_dbs(1).open(path)? };

        let mut wtxn = env.write_txn()?;
        let ledger_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some(LEDGER_DB))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");
        Ok(Self { env, ledger_db })
    }

    pub(crate) fn env(&self) -> &Env {
        &self.env
    }

    /// Begin the write transaction for one contract invocation.
    pub fn write_batch(&self) -> Result<WriteBatch<'_>, LmdbError> {
        WriteBatch::new(self)
    }

    /// Open a read-only snapshot for queries.
    pub fn read_view(&self) -> Result<ReadView<'_>, LmdbError> {
        ReadView::new(self)
    }
}
