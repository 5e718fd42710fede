//! Initialization arguments.
//!
//! The host hands the contract twelve named string fields once, at
//! deployment. Times accept either epoch seconds or a `YYYY-Mon-DD` date
//! (midnight UTC); stake ages are given in days and stored in seconds.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use aerial_types::{ContractConfig, Timestamp, SECONDS_PER_DAY};

use crate::ContractError;

/// The required initialization fields, in declaration order.
pub const INIT_FIELDS: [&str; 12] = [
    "name",
    "symbol",
    "decimals",
    "chainStartTime",
    "chainStartBlockNumber",
    "stakeStartTime",
    "stakeMinAge",
    "stakeMaxAge",
    "maxMintProofOfStake",
    "totalSupply",
    "maxTotalSupply",
    "totalInitialSupply",
];

/// Date layout accepted for `chainStartTime` / `stakeStartTime`, e.g. `2017-Jan-02`.
const DATE_FORMAT: &str = "%Y-%b-%d";

/// A genesis balance credited at initialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub address: String,
    pub balance: u128,
}

/// Parse the initialization fields into a [`ContractConfig`].
pub fn parse_init_args(args: &BTreeMap<String, String>) -> Result<ContractConfig, ContractError> {
    if args.len() < INIT_FIELDS.len() {
        return Err(ContractError::InvalidArguments(format!(
            "expected {} init arguments, got {}",
            INIT_FIELDS.len(),
            args.len()
        )));
    }
    for key in args.keys() {
        if !INIT_FIELDS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "ignoring unknown init argument");
        }
    }

    let config = ContractConfig {
        name: field(args, "name")?.to_string(),
        symbol: field(args, "symbol")?.to_string(),
        decimals: parse_number(args, "decimals")?,
        chain_start_time: parse_time(args, "chainStartTime")?,
        chain_start_block_number: parse_number(args, "chainStartBlockNumber")?,
        stake_start_time: parse_time(args, "stakeStartTime")?,
        stake_min_age: parse_days(args, "stakeMinAge")?,
        stake_max_age: parse_days(args, "stakeMaxAge")?,
        max_mint_proof_of_stake: parse_number(args, "maxMintProofOfStake")?,
        total_supply: parse_number(args, "totalSupply")?,
        max_total_supply: parse_number(args, "maxTotalSupply")?,
        total_initial_supply: parse_number(args, "totalInitialSupply")?,
    };

    check_config(&config)?;
    Ok(config)
}

/// Reject configurations no mint could run under.
pub(crate) fn check_config(config: &ContractConfig) -> Result<(), ContractError> {
    if config.decimals > ContractConfig::MAX_DECIMALS {
        return Err(ContractError::InvalidArguments(format!(
            "decimals {} exceeds {}",
            config.decimals,
            ContractConfig::MAX_DECIMALS
        )));
    }
    if !config.is_supply_within_cap() {
        return Err(ContractError::InvalidArguments(format!(
            "totalSupply {} exceeds maxTotalSupply {}",
            config.total_supply, config.max_total_supply
        )));
    }
    Ok(())
}

fn field<'a>(args: &'a BTreeMap<String, String>, name: &str) -> Result<&'a str, ContractError> {
    args.get(name)
        .map(|v| v.trim())
        .ok_or_else(|| ContractError::InvalidArguments(format!("missing init argument {}", name)))
}

fn parse_number<T: std::str::FromStr>(
    args: &BTreeMap<String, String>,
    name: &str,
) -> Result<T, ContractError> {
    let raw = field(args, name)?;
    raw.parse()
        .map_err(|_| ContractError::InvalidArguments(format!("{} is not a valid number: {:?}", name, raw)))
}

fn parse_days(args: &BTreeMap<String, String>, name: &str) -> Result<u64, ContractError> {
    let days: u64 = parse_number(args, name)?;
    days.checked_mul(SECONDS_PER_DAY)
        .ok_or_else(|| ContractError::InvalidArguments(format!("{} is out of range", name)))
}

fn parse_time(args: &BTreeMap<String, String>, name: &str) -> Result<Timestamp, ContractError> {
    let raw = field(args, name)?;
    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Timestamp::new(secs));
    }
    let invalid = || ContractError::InvalidArguments(format!("{} is not a timestamp or date: {:?}", name, raw));
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())?;
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).ok_or_else(invalid)?;
    let days = date.signed_duration_since(epoch).num_days();
    u64::try_from(days)
        .ok()
        .and_then(|d| d.checked_mul(SECONDS_PER_DAY))
        .map(Timestamp::new)
        .ok_or_else(invalid)
}
