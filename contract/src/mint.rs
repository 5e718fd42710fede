//! Proof-of-stake mint-and-settle.
//!
//! Steps, in order, stopping at the first that fails:
//! 1. the account's balance must exist
//! 2. its stake history must be non-empty
//! 3. its coin-age must be positive
//! 4. the tiered interest and resulting reward must be positive
//! 5. the reward must fit under the supply cap
//!
//! Steps 2–4 end in [`MintOutcome::NotEligible`], a normal outcome. Only
//! then are balance, total supply and stake history written, in that order.

use aerial_stake::{history, Eligibility, Ineligibility, StakeEngine};
use aerial_store::LedgerStore;
use aerial_types::{AccountAddress, ContractConfig, Timestamp};

use crate::state::{read_total_supply, require_balance, write_balance, write_total_supply};
use crate::ContractError;

/// Figures of a completed mint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    pub coin_age: u128,
    pub interest: u128,
    pub reward: u128,
    pub new_balance: u128,
    pub new_total_supply: u128,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MintOutcome {
    Minted(MintReceipt),
    NotEligible(Ineligibility),
}

impl MintOutcome {
    pub fn is_minted(&self) -> bool {
        matches!(self, MintOutcome::Minted(_))
    }
}

/// Mint the proof-of-stake reward owed to `address` at `now`.
///
/// On success the account's history is reset to a single record holding
/// the new balance, stamped `now`. A store failure after the supply check
/// leaves earlier writes in place; the error is fatal and the host must
/// discard the transaction.
pub fn mint_and_settle(
    store: &dyn LedgerStore,
    config: &ContractConfig,
    address: &AccountAddress,
    now: Timestamp,
) -> Result<MintOutcome, ContractError> {
    let balance = require_balance(store, address)?;
    let records = history::load(store, address)?;

    let engine = StakeEngine::new(config);
    let quote = match engine.quote(&records, now)? {
        Eligibility::Eligible(quote) => quote,
        Eligibility::Ineligible(reason) => {
            tracing::debug!(%address, %now, %reason, "not eligible to mint");
            return Ok(MintOutcome::NotEligible(reason));
        }
    };

    let supply = read_total_supply(store)?;
    if quote.reward > config.mint_headroom(supply) {
        tracing::warn!(%address, supply, reward = quote.reward, cap = config.max_total_supply, "mint rejected: supply cap");
        return Err(ContractError::SupplyCapExceeded {
            current: supply,
            reward: quote.reward,
            max: config.max_total_supply,
        });
    }
    let new_total_supply = supply.checked_add(quote.reward).ok_or(ContractError::Overflow)?;
    let new_balance = balance.checked_add(quote.reward).ok_or(ContractError::Overflow)?;
    let settled = engine.settled_history(address, new_balance, now);

    let persisted = write_balance(store, address, new_balance)
        .and_then(|_| write_total_supply(store, new_total_supply))
        .and_then(|_| history::save(store, address, &settled).map_err(ContractError::from));
    if let Err(e) = persisted {
        tracing::error!(%address, error = %e, "mint persistence failed after supply check");
        return Err(e);
    }

    tracing::info!(
        %address,
        coin_age = quote.coin_age,
        interest = quote.interest,
        reward = quote.reward,
        new_balance,
        new_total_supply,
        "proof-of-stake reward minted"
    );
    Ok(MintOutcome::Minted(MintReceipt {
        coin_age: quote.coin_age,
        interest: quote.interest,
        reward: quote.reward,
        new_balance,
        new_total_supply,
    }))
}
