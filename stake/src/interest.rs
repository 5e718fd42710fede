//! Tiered proof-of-stake interest schedule.

use crate::error::StakeError;
use aerial_types::{Timestamp, SECONDS_PER_YEAR};
use primitive_types::U256;

/// Interest multiplier (percent of the base rate) in the first stake year.
pub const YEAR_ZERO_RATE_PCT: u128 = 770;
/// Interest multiplier (percent of the base rate) in the second stake year.
pub const YEAR_ONE_RATE_PCT: u128 = 435;

/// Select the interest rate for a mint at `now`.
///
/// | whole years since `stake_start_time` | interest |
/// |---|---|
/// | 0 | `max_mint × 770 / 100` |
/// | 1 | `max_mint × 435 / 100` |
/// | ≥ 2 | `max_mint` |
///
/// Returns 0 when staking is disabled (`stake_start_time` is the epoch) or
/// has not started yet (`now <= stake_start_time`).
pub fn select_interest(
    now: Timestamp,
    stake_start_time: Timestamp,
    max_mint_proof_of_stake: u128,
) -> Result<u128, StakeError> {
    if stake_start_time.is_epoch() || now <= stake_start_time {
        return Ok(0);
    }
    let elapsed_years = stake_start_time.elapsed_since(now) / SECONDS_PER_YEAR;
    let pct = match elapsed_years {
        0 => YEAR_ZERO_RATE_PCT,
        1 => YEAR_ONE_RATE_PCT,
        _ => return Ok(max_mint_proof_of_stake),
    };
    max_mint_proof_of_stake
        .checked_mul(pct)
        .map(|v| v / 100)
        .ok_or(StakeError::Overflow)
}

/// `reward = coin_age × interest / (365 × 10^decimals)`, truncating.
///
/// The product is taken in 256 bits, so only a reward that does not fit in
/// `u128` is an overflow. A divisor beyond 256 bits exceeds any product and
/// yields zero.
pub fn compute_reward(coin_age: u128, interest: u128, decimals: u32) -> Result<u128, StakeError> {
    // u128 × u128 always fits in 256 bits.
    let product = U256::from(coin_age) * U256::from(interest);
    let divisor = match U256::from(10u8)
        .checked_pow(U256::from(decimals))
        .and_then(|scale| scale.checked_mul(U256::from(365u16)))
    {
        Some(divisor) => divisor,
        None => return Ok(0),
    };
    let reward = product / divisor;
    if reward > U256::from(u128::MAX) {
        return Err(StakeError::Overflow);
    }
    Ok(reward.low_u128())
}
