//! The contract entry points: initialization and per-transaction dispatch.

use std::collections::{BTreeMap, BTreeSet};

use aerial_stake::{history, StakeRecord};
use aerial_store::LedgerStore;
use aerial_types::{AccountAddress, ContractConfig, Timestamp};

use crate::account::{check_balance, delete_account};
use crate::init::{check_config, parse_init_args, Allocation};
use crate::invocation::Invocation;
use crate::mint::{mint_and_settle, MintOutcome};
use crate::state::{read_balance, read_config, write_balance, write_config, write_total_supply, CONFIG_KEY};
use crate::transfer::transfer;
use crate::ContractError;

/// What the host hands the contract for one transaction.
#[derive(Clone, Copy, Debug)]
pub struct TxContext<'a> {
    pub function: &'a str,
    pub args: &'a BTreeMap<String, String>,
    pub now: Timestamp,
}

/// A deployed stake contract bound to its configuration.
#[derive(Clone, Debug)]
pub struct StakeContract {
    config: ContractConfig,
}

impl StakeContract {
    pub fn new(config: ContractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Initialize an empty ledger.
    ///
    /// Persists the configuration and the live total supply, then credits
    /// each genesis allocation and seeds its stake history with one record
    /// dated `chain_start_time`. Allocations are validated before anything
    /// is written.
    pub fn init(
        store: &dyn LedgerStore,
        config: ContractConfig,
        allocations: &[Allocation],
    ) -> Result<Self, ContractError> {
        if store.exists(CONFIG_KEY)? {
            return Err(ContractError::InvalidArguments("contract is already initialized".into()));
        }
        check_config(&config)?;
        let genesis = validate_allocations(&config, allocations)?;
        for (address, _) in &genesis {
            if read_balance(store, address)?.is_some() {
                return Err(ContractError::InvalidArguments(format!("account {} already exists", address)));
            }
        }

        write_config(store, &config)?;
        write_total_supply(store, config.total_supply)?;
        for (address, balance) in &genesis {
            write_balance(store, address, *balance)?;
            history::save(
                store,
                address,
                &[StakeRecord::new(address.clone(), *balance, config.chain_start_time)],
            )?;
        }

        tracing::info!(
            name = %config.name,
            symbol = %config.symbol,
            total_supply = config.total_supply,
            max_total_supply = config.max_total_supply,
            allocations = genesis.len(),
            "contract initialized"
        );
        Ok(Self::new(config))
    }

    /// Parse the twelve init fields and initialize.
    pub fn init_from_args(
        store: &dyn LedgerStore,
        args: &BTreeMap<String, String>,
        allocations: &[Allocation],
    ) -> Result<Self, ContractError> {
        let config = parse_init_args(args)?;
        Self::init(store, config, allocations)
    }

    /// Reconstruct the contract from its persisted configuration.
    pub fn load(store: &dyn LedgerStore) -> Result<Self, ContractError> {
        read_config(store).map(Self::new)
    }

    /// Run one parsed invocation at `now`.
    ///
    /// `CheckBalance` returns the decimal balance and `MintPoS` returns
    /// `true` or `false` for whether a reward was minted. The others return
    /// no payload.
    pub fn invoke(
        &self,
        store: &dyn LedgerStore,
        invocation: &Invocation,
        now: Timestamp,
    ) -> Result<Option<Vec<u8>>, ContractError> {
        tracing::debug!(function = invocation.function_name(), %now, "invoking");
        match invocation {
            Invocation::MakePayment {
                source,
                destination,
                amount,
            } => {
                transfer(store, source, destination, *amount)?;
                Ok(None)
            }
            Invocation::DeleteAccount { account } => {
                delete_account(store, account)?;
                Ok(None)
            }
            Invocation::CheckBalance { account } => check_balance(store, account).map(Some),
            Invocation::MintPoS { account } => {
                let minted = match mint_and_settle(store, &self.config, account, now)? {
                    MintOutcome::Minted(_) => true,
                    MintOutcome::NotEligible(_) => false,
                };
                Ok(Some(minted.to_string().into_bytes()))
            }
        }
    }

    /// Load the contract, parse the call in `ctx` and run it.
    pub fn handle(store: &dyn LedgerStore, ctx: &TxContext<'_>) -> Result<Option<Vec<u8>>, ContractError> {
        let contract = Self::load(store)?;
        let invocation = Invocation::parse(ctx.function, ctx.args)?;
        contract.invoke(store, &invocation, ctx.now)
    }
}

fn validate_allocations(
    config: &ContractConfig,
    allocations: &[Allocation],
) -> Result<Vec<(AccountAddress, u128)>, ContractError> {
    let mut seen = BTreeSet::new();
    let mut sum: u128 = 0;
    let mut genesis = Vec::with_capacity(allocations.len());
    for alloc in allocations {
        let address = AccountAddress::parse(alloc.address.trim()).ok_or_else(|| {
            ContractError::InvalidArguments(format!("invalid genesis address {:?}", alloc.address))
        })?;
        if !seen.insert(address.clone()) {
            return Err(ContractError::InvalidArguments(format!("duplicate genesis address {}", address)));
        }
        sum = sum
            .checked_add(alloc.balance)
            .ok_or_else(|| ContractError::InvalidArguments("genesis allocations overflow".into()))?;
        genesis.push((address, alloc.balance));
    }
    if sum > config.total_initial_supply || sum > config.total_supply {
        return Err(ContractError::InvalidArguments(format!(
            "genesis allocations total {} exceed the initial supply {}",
            sum,
            config.total_initial_supply.min(config.total_supply)
        )));
    }
    Ok(genesis)
}
