//! Balance query and account deletion.

use aerial_stake::history;
use aerial_store::LedgerStore;
use aerial_types::AccountAddress;

use crate::state::{encode_amount, require_balance};
use crate::ContractError;

/// The balance of `address` as a decimal ASCII payload.
pub fn check_balance(store: &dyn LedgerStore, address: &AccountAddress) -> Result<Vec<u8>, ContractError> {
    let balance = require_balance(store, address)?;
    tracing::debug!(%address, balance, "balance query");
    Ok(encode_amount(balance))
}

/// Delete an account's balance and stake history.
///
/// The total supply is left untouched.
pub fn delete_account(store: &dyn LedgerStore, address: &AccountAddress) -> Result<(), ContractError> {
    let balance = require_balance(store, address)?;
    store.delete(address.balance_key())?;
    history::remove(store, address)?;
    tracing::info!(%address, balance, "account deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::write_balance;
    use aerial_nullables::NullStore;
    use aerial_stake::StakeRecord;
    use aerial_types::Timestamp;

    fn alice() -> AccountAddress {
        AccountAddress::parse("alice").unwrap()
    }

    #[test]
    fn check_balance_payload() {
        let store = NullStore::new();
        write_balance(&store, &alice(), 42).unwrap();
        assert_eq!(check_balance(&store, &alice()).unwrap(), b"42".to_vec());
    }

    #[test]
    fn check_balance_of_missing_account() {
        let store = NullStore::new();
        assert!(matches!(
            check_balance(&store, &alice()),
            Err(ContractError::AccountNotFound(_))
        ));
    }

    #[test]
    fn delete_removes_balance_and_history() {
        let store = NullStore::new();
        write_balance(&store, &alice(), 42).unwrap();
        history::save(&store, &alice(), &[StakeRecord::new(alice(), 42, Timestamp::new(1))]).unwrap();

        delete_account(&store, &alice()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn delete_missing_account() {
        let store = NullStore::new();
        assert!(matches!(
            delete_account(&store, &alice()),
            Err(ContractError::AccountNotFound(_))
        ));
    }
}
