//! Core stake engine: turns a stake history into a reward quote.

use std::fmt;

use crate::coin_age::compute_coin_age;
use crate::error::StakeError;
use crate::history::StakeRecord;
use crate::interest::{compute_reward, select_interest};
use aerial_types::{AccountAddress, ContractConfig, Timestamp};

/// Why an account earns nothing this round. Not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ineligibility {
    /// The account has no stake records.
    EmptyHistory,
    /// No record has reached the minimum stake age, or none has aged a whole day.
    NoMatureStake,
    /// Staking is disabled or has not started.
    StakingNotStarted,
    /// Coin-age and interest were positive but the truncated reward is zero.
    ZeroReward,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Ineligibility::EmptyHistory => "no stake history",
            Ineligibility::NoMatureStake => "no mature stake",
            Ineligibility::StakingNotStarted => "staking has not started",
            Ineligibility::ZeroReward => "reward rounds to zero",
        };
        f.write_str(reason)
    }
}

/// The figures behind a positive reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardQuote {
    pub coin_age: u128,
    pub interest: u128,
    pub reward: u128,
}

/// Outcome of quoting a reward.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Eligibility {
    Eligible(RewardQuote),
    Ineligible(Ineligibility),
}

/// Computes coin-age, interest and rewards for one
/// contract configuration.
///
/// Holds no state of its own: every figure is a pure function of the
/// configuration, the stake history and `now`.
pub struct StakeEngine<'a> {
    config: &'a ContractConfig,
}

impl<'a> StakeEngine<'a> {
    pub fn new(config: &'a ContractConfig) -> Self {
        Self { config }
    }

    /// Coin-age of `history` at `now` under the configured min/max stake age.
    pub fn coin_age(&self, history: &[StakeRecord], now: Timestamp) -> Result<Option<u128>, StakeError> {
        compute_coin_age(
            history,
            now,
            self.config.stake_min_age,
            self.config.stake_max_age,
        )
    }

    /// Interest rate in effect at `now`; 0 before the stake program starts.
    pub fn interest(&self, now: Timestamp) -> Result<u128, StakeError> {
        select_interest(
            now,
            self.config.stake_start_time,
            self.config.max_mint_proof_of_stake,
        )
    }

    /// Reward for a given coin-age and interest under the configured decimals.
    pub fn reward(&self, coin_age: u128, interest: u128) -> Result<u128, StakeError> {
        compute_reward(coin_age, interest, self.config.decimals)
    }

    /// Quote the proof-of-stake reward for `history` at `now`.
    ///
    /// Checks run in order: history present, coin-age positive, staking
    /// started, reward positive. The first failing check is reported.
    pub fn quote(&self, history: &[StakeRecord], now: Timestamp) -> Result<Eligibility, StakeError> {
        if history.is_empty() {
            return Ok(Eligibility::Ineligible(Ineligibility::EmptyHistory));
        }
        let coin_age = match self.coin_age(history, now)? {
            Some(age) if age > 0 => age,
            _ => return Ok(Eligibility::Ineligible(Ineligibility::NoMatureStake)),
        };
        let interest = self.interest(now)?;
        if interest == 0 {
            return Ok(Eligibility::Ineligible(Ineligibility::StakingNotStarted));
        }
        let reward = self.reward(coin_age, interest)?;
        if reward == 0 {
            return Ok(Eligibility::Ineligible(Ineligibility::ZeroReward));
        }
        Ok(Eligibility::Eligible(RewardQuote {
            coin_age,
            interest,
            reward,
        }))
    }

    /// The history an account is left with after minting.
    ///
    /// Minting consumes the whole coin-age: the log is reset to one record
    /// holding the new balance, stamped `now`. Earlier records, mature or
    /// not, are discarded.
    pub fn settled_history(
        &self,
        address: &AccountAddress,
        new_balance: u128,
        now: Timestamp,
    ) -> Vec<StakeRecord> {
        vec![StakeRecord::new(address.clone(), new_balance, now)]
    }
}
