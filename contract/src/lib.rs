//! The Aerial stake contract.
//!
//! A deterministic state-transition layer run by a ledger host once per
//! transaction. The host supplies a [`aerial_store::LedgerStore`] scoped to
//! the transaction, the invocation arguments and the transaction time; the
//! contract reads and writes the store sequentially and never performs I/O
//! of its own.
//!
//! - [`init`]: parses the twelve initialization fields into a `ContractConfig`
//! - [`invocation`]: resolves a function name + named arguments into an [`Invocation`]
//! - [`transfer`]: direct balance transfer between two accounts
//! - [`mint`]: the proof-of-stake mint-and-settle transaction
//! - [`account`]: balance query and account deletion
//! - [`contract`]: [`StakeContract`], initialization and per-call dispatch
//! - [`state`]: ledger keys and value encodings

pub mod account;
pub mod contract;
pub mod error;
pub mod init;
pub mod invocation;
pub mod mint;
pub mod state;
pub mod transfer;

pub use contract::{StakeContract, TxContext};
pub use error::ContractError;
pub use init::{parse_init_args, Allocation, INIT_FIELDS};
pub use invocation::Invocation;
pub use mint::{mint_and_settle, MintOutcome, MintReceipt};
pub use transfer::{transfer, TransferReceipt};
