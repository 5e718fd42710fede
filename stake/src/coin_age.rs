//! Coin-age: how much, and for how long, an account has staked.

use crate::error::StakeError;
use crate::history::StakeRecord;
use aerial_types::{Timestamp, SECONDS_PER_DAY};

/// Compute the coin-age of a stake history at `now`.
///
/// `coin_age = Σ amount_i × (min(now − time_i, max_age) / 1 day)`
///
/// Records younger than `min_age` are skipped. Integer arithmetic only,
/// so the result is bit-reproducible. Returns `Ok(None)` when no record is
/// old enough to count (including an empty history); `Ok(Some(0))` means
/// records counted but none has aged a whole day yet.
pub fn compute_coin_age(
    records: &[StakeRecord],
    now: Timestamp,
    min_age: u64,
    max_age: u64,
) -> Result<Option<u128>, StakeError> {
    let mut total: Option<u128> = None;
    for record in records {
        if !record.time.has_expired(min_age, now) {
            continue;
        }
        let age = record.time.elapsed_since(now).min(max_age);
        let days = u128::from(age / SECONDS_PER_DAY);
        let weighted = record.amount.checked_mul(days).ok_or(StakeError::Overflow)?;
        total = Some(
            total
                .unwrap_or(0)
                .checked_add(weighted)
                .ok_or(StakeError::Overflow)?,
        );
    }
    Ok(total)
}
