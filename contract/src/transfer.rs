//! Direct balance transfer. Bypasses stake accounting entirely.

use aerial_store::LedgerStore;
use aerial_types::AccountAddress;

use crate::state::{require_balance, write_balance};
use crate::ContractError;

/// Balances after a transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferReceipt {
    pub source_balance: u128,
    pub destination_balance: u128,
}

/// Move `amount` from `source` to `destination`.
///
/// Both accounts must exist and `source` must hold at least `amount`;
/// otherwise nothing is written. The source is written first. If the
/// destination write then fails the ledger is inconsistent, and the
/// returned store error is fatal for the transaction.
pub fn transfer(
    store: &dyn LedgerStore,
    source: &AccountAddress,
    destination: &AccountAddress,
    amount: u128,
) -> Result<TransferReceipt, ContractError> {
    let src = require_balance(store, source)?;
    let dst = require_balance(store, destination)?;

    if amount > src {
        tracing::warn!(%source, %destination, amount, available = src, "transfer rejected: insufficient balance");
        return Err(ContractError::InsufficientBalance {
            needed: amount,
            available: src,
        });
    }

    // Writing both sides would credit the account with the second write.
    if source == destination {
        tracing::debug!(%source, amount, "self-transfer, nothing to write");
        return Ok(TransferReceipt {
            source_balance: src,
            destination_balance: src,
        });
    }

    let new_src = src - amount;
    let new_dst = dst.checked_add(amount).ok_or(ContractError::Overflow)?;

    write_balance(store, source, new_src)?;
    if let Err(e) = write_balance(store, destination, new_dst) {
        tracing::error!(%source, %destination, error = %e, "destination write failed after source was debited");
        return Err(e);
    }

    tracing::info!(%source, %destination, amount, source_balance = new_src, destination_balance = new_dst, "transfer applied");
    Ok(TransferReceipt {
        source_balance: new_src,
        destination_balance: new_dst,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerial_nullables::NullStore;

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::parse(s).unwrap()
    }

    fn funded(pairs: &[(&str, u128)]) -> NullStore {
        let store = NullStore::new();
        for (name, balance) in pairs {
            write_balance(&store, &addr(name), *balance).unwrap();
        }
        store
    }

    #[test]
    fn moves_value() {
        let store = funded(&[("alice", 100), ("bob", 5)]);
        let receipt = transfer(&store, &addr("alice"), &addr("bob"), 30).unwrap();
        assert_eq!(receipt, TransferReceipt { source_balance: 70, destination_balance: 35 });
        assert_eq!(require_balance(&store, &addr("alice")).unwrap(), 70);
        assert_eq!(require_balance(&store, &addr("bob")).unwrap(), 35);
    }

    #[test]
    fn whole_balance_can_move() {
        let store = funded(&[("alice", 100), ("bob", 0)]);
        transfer(&store, &addr("alice"), &addr("bob"), 100).unwrap();
        assert_eq!(require_balance(&store, &addr("alice")).unwrap(), 0);
        assert_eq!(require_balance(&store, &addr("bob")).unwrap(), 100);
    }

    #[test]
    fn insufficient_balance_writes_nothing() {
        let store = funded(&[("alice", 10), ("bob", 5)]);
        let before = store.snapshot();
        let result = transfer(&store, &addr("alice"), &addr("bob"), 11);
        assert!(matches!(
            result,
            Err(ContractError::InsufficientBalance { needed: 11, available: 10 })
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn missing_accounts() {
        let store = funded(&[("alice", 10)]);
        assert!(matches!(
            transfer(&store, &addr("alice"), &addr("ghost"), 1),
            Err(ContractError::AccountNotFound(name)) if name == "ghost"
        ));
        assert!(matches!(
            transfer(&store, &addr("ghost"), &addr("alice"), 1),
            Err(ContractError::AccountNotFound(name)) if name == "ghost"
        ));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn self_transfer_keeps_balance() {
        let store = funded(&[("alice", 10)]);
        let receipt = transfer(&store, &addr("alice"), &addr("alice"), 4).unwrap();
        assert_eq!(receipt.source_balance, 10);
        assert_eq!(require_balance(&store, &addr("alice")).unwrap(), 10);
        assert!(matches!(
            transfer(&store, &addr("alice"), &addr("alice"), 11),
            Err(ContractError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn destination_overflow_writes_nothing() {
        let store = funded(&[("alice", 10), ("bob", u128::MAX)]);
        let before = store.snapshot();
        assert!(matches!(
            transfer(&store, &addr("alice"), &addr("bob"), 1),
            Err(ContractError::Overflow)
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn failed_second_write_is_fatal() {
        let store = funded(&[("alice", 10), ("bob", 5)]);
        store.fail_writes_after(1);
        let err = transfer(&store, &addr("alice"), &addr("bob"), 3).unwrap_err();
        assert!(err.is_fatal());
        // The source debit landed; only the host's rollback can undo it.
        assert_eq!(require_balance(&store, &addr("alice")).unwrap(), 7);
        assert_eq!(require_balance(&store, &addr("bob")).unwrap(), 5);
    }
}
