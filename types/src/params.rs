//! Contract configuration: fixed at initialization, read-only afterwards.
//!
//! The configuration is an explicit value handed to every operation; nothing
//! in the engine holds it as global state.

use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// All parameters of a deployed stake contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    // ── Token ────────────────────────────────────────────────────────────
    pub name: String,
    pub symbol: String,
    /// Number of decimal places of the raw unit. Rewards divide by `10^decimals`.
    pub decimals: u32,

    // ── Chain ────────────────────────────────────────────────────────────
    pub chain_start_time: Timestamp,
    pub chain_start_block_number: u64,

    // ── Proof of stake ───────────────────────────────────────────────────
    /// When the stake program starts. `Timestamp::EPOCH` disables minting.
    pub stake_start_time: Timestamp,
    /// Seconds a stake record must age before it earns coin-age.
    pub stake_min_age: u64,
    /// Upper bound (seconds) on the age credited to a single record.
    pub stake_max_age: u64,
    /// Base annual interest; year 0 pays 7.7x and year 1 pays 4.35x of it.
    pub max_mint_proof_of_stake: u128,

    // ── Supply ───────────────────────────────────────────────────────────
    /// Supply at initialization. The live supply is ledger state.
    pub total_supply: u128,
    pub max_total_supply: u128,
    pub total_initial_supply: u128,
}

impl ContractConfig {
    /// Largest `decimals` a `u128` amount can express: `10^38 < u128::MAX < 10^39`.
    pub const MAX_DECIMALS: u32 = 38;

    /// Whether the initial supply respects the supply cap.
    pub fn is_supply_within_cap(&self) -> bool {
        self.total_supply <= self.max_total_supply
    }

    /// Supply that may still be minted on top of `current_supply`.
    pub fn mint_headroom(&self, current_supply: u128) -> u128 {
        self.max_total_supply.saturating_sub(current_supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContractConfig {
        ContractConfig {
            name: "Aerial".into(),
            symbol: "AER".into(),
            decimals: 0,
            chain_start_time: Timestamp::new(1_000),
            chain_start_block_number: 1,
            stake_start_time: Timestamp::new(1_000),
            stake_min_age: 0,
            stake_max_age: 0,
            max_mint_proof_of_stake: 100,
            total_supply: 500,
            max_total_supply: 1_000,
            total_initial_supply: 500,
        }
    }

    #[test]
    fn supply_within_cap() {
        let mut cfg = sample();
        assert!(cfg.is_supply_within_cap());
        cfg.total_supply = 1_000;
        assert!(cfg.is_supply_within_cap());
        cfg.total_supply = 1_001;
        assert!(!cfg.is_supply_within_cap());
    }

    #[test]
    fn max_decimals_unit_fits_u128() {
        assert!(10u128.checked_pow(ContractConfig::MAX_DECIMALS).is_some());
        assert!(10u128.checked_pow(ContractConfig::MAX_DECIMALS + 1).is_none());
    }

    #[test]
    fn headroom_saturates() {
        let cfg = sample();
        assert_eq!(cfg.mint_headroom(400), 600);
        assert_eq!(cfg.mint_headroom(2_000), 0);
    }

    #[test]
    fn bincode_roundtrip() {
        let cfg = sample();
        let bytes = bincode::serialize(&cfg).unwrap();
        let back: ContractConfig = bincode::deserialize(&bytes).unwrap();
        assert_eq!(back, cfg);
    }
}
