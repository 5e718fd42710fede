//! Stake accounting: the proof-of-stake reward engine.
//!
//! Rewards are a deterministic function of an account's stake history and
//! the transaction time:
//! `reward = coin_age × interest / (365 × 10^decimals)`
//!
//! This crate handles:
//! - The per-account stake history log and its ledger encoding
//! - Coin-age: stake amount × whole days held, between the minimum and maximum age
//! - The tiered interest schedule (7.7x, 4.35x, then 1x of the base rate)
//! - Combining both into a reward quote with an explicit eligibility verdict

pub mod coin_age;
pub mod engine;
pub mod error;
pub mod history;
pub mod interest;

pub use coin_age::compute_coin_age;
pub use engine::{Eligibility, Ineligibility, RewardQuote, StakeEngine};
pub use error::StakeError;
pub use history::StakeRecord;
pub use interest::{compute_reward, select_interest};
