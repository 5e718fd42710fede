//! LMDB storage backend for the Aerial stake ledger.
//!
//! Implements [`aerial_store::LedgerStore`] using the `heed` LMDB bindings.
//! The whole ledger lives in one LMDB database; each contract invocation
//! runs inside one [`WriteBatch`], which is the host's transaction boundary.
//! Queries use a [`ReadView`].

pub mod environment;
pub mod error;
pub mod read_view;
pub mod write_batch;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use read_view::ReadView;
pub use write_batch::WriteBatch;
