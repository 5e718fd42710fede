//! Ledger keys and value encodings owned by the contract.
//!
//! Balances and the live total supply are decimal ASCII. The configuration
//! is bincode. Metadata keys live in the `__` namespace, which account
//! addresses cannot enter.

use aerial_store::LedgerStore;
use aerial_types::{AccountAddress, ContractConfig};

use crate::ContractError;

/// Key of the live total supply.
pub const TOTAL_SUPPLY_KEY: &[u8] = b"__totalSupply";
/// Key of the persisted contract configuration.
pub const CONFIG_KEY: &[u8] = b"__config";

pub fn encode_amount(amount: u128) -> Vec<u8> {
    amount.to_string().into_bytes()
}

pub fn decode_amount(bytes: &[u8], what: &str) -> Result<u128, ContractError> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.parse::<u128>().ok())
        .ok_or_else(|| ContractError::Corruption(format!("{} is not a decimal amount", what)))
}

/// Read a balance; `None` when the account does not exist.
pub fn read_balance(
    store: &dyn LedgerStore,
    address: &AccountAddress,
) -> Result<Option<u128>, ContractError> {
    match store.get(address.balance_key())? {
        Some(bytes) => decode_amount(&bytes, &format!("balance of {}", address)).map(Some),
        None => Ok(None),
    }
}

/// Read a balance that must exist.
pub fn require_balance(store: &dyn LedgerStore, address: &AccountAddress) -> Result<u128, ContractError> {
    read_balance(store, address)?.ok_or_else(|| ContractError::AccountNotFound(address.to_string()))
}

pub fn write_balance(
    store: &dyn LedgerStore,
    address: &AccountAddress,
    amount: u128,
) -> Result<(), ContractError> {
    store.put(address.balance_key(), &encode_amount(amount))?;
    Ok(())
}

/// Read the live total supply. Absent means the contract was never initialized.
pub fn read_total_supply(store: &dyn LedgerStore) -> Result<u128, ContractError> {
    let bytes = store.get(TOTAL_SUPPLY_KEY)?.ok_or(ContractError::NotInitialized)?;
    decode_amount(&bytes, "total supply")
}

pub fn write_total_supply(store: &dyn LedgerStore, supply: u128) -> Result<(), ContractError> {
    store.put(TOTAL_SUPPLY_KEY, &encode_amount(supply))?;
    Ok(())
}

pub fn read_config(store: &dyn LedgerStore) -> Result<ContractConfig, ContractError> {
    let bytes = store.get(CONFIG_KEY)?.ok_or(ContractError::NotInitialized)?;
    bincode::deserialize(&bytes).map_err(|e| ContractError::Corruption(e.to_string()))
}

pub fn write_config(store: &dyn LedgerStore, config: &ContractConfig) -> Result<(), ContractError> {
    let bytes = bincode::serialize(config).map_err(|e| ContractError::Serialization(e.to_string()))?;
    store.put(CONFIG_KEY, &bytes)?;
    Ok(())
}
