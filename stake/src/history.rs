//! Per-account stake history log.
//!
//! The log is a JSON array of `{"address", "amount", "time"}` objects stored
//! under [`aerial_crypto::derive_history_key`] of the owning address.

use crate::error::StakeError;
use aerial_crypto::derive_history_key;
use aerial_store::LedgerStore;
use aerial_types::{AccountAddress, Timestamp};
use serde::{Deserialize, Serialize};

/// One deposit event contributing to an account's coin-age.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeRecord {
    pub address: AccountAddress,
    /// Stake-weighted amount (raw units).
    pub amount: u128,
    /// When the stake was deposited.
    pub time: Timestamp,
}

impl StakeRecord {
    pub fn new(address: AccountAddress, amount: u128, time: Timestamp) -> Self {
        Self {
            address,
            amount,
            time,
        }
    }
}

/// Encode a history log to its ledger representation.
pub fn encode(records: &[StakeRecord]) -> Result<Vec<u8>, StakeError> {
    serde_json::to_vec(records).map_err(|e| StakeError::Serialization(e.to_string()))
}

/// Decode a stored history log. An empty value is an empty log.
pub fn decode(bytes: &[u8]) -> Result<Vec<StakeRecord>, StakeError> {
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes).map_err(|e| StakeError::Corruption(e.to_string()))
}

/// Load the stake history of `address`.
///
/// An absent key is an empty history, not an error. A stored record that
/// names another account is treated as corruption.
pub fn load(store: &dyn LedgerStore, address: &AccountAddress) -> Result<Vec<StakeRecord>, StakeError> {
    let key = derive_history_key(address);
    let records = match store.get(key.as_bytes())? {
        Some(bytes) => decode(&bytes)?,
        None => return Ok(Vec::new()),
    };
    if let Some(foreign) = records.iter().find(|r| r.address != *address) {
        return Err(StakeError::Corruption(format!(
            "history of {} contains a record for {}",
            address, foreign.address
        )));
    }
    Ok(records)
}

/// Replace the stake history of `address` with `records`.
pub fn save(
    store: &dyn LedgerStore,
    address: &AccountAddress,
    records: &[StakeRecord],
) -> Result<(), StakeError> {
    let bytes = encode(records)?;
    let key = derive_history_key(address);
    store.put(key.as_bytes(), &bytes)?;
    tracing::trace!(%address, records = records.len(), history_key = %key, "saved stake history");
    Ok(())
}

/// Remove the stake history of `address`.
pub fn remove(store: &dyn LedgerStore, address: &AccountAddress) -> Result<(), StakeError> {
    store.delete(derive_history_key(address).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerial_nullables::NullStore;

    fn addr(s: &str) -> AccountAddress {
        AccountAddress::parse(s).unwrap()
    }

    #[test]
    fn absent_history_is_empty() {
        let store = NullStore::new();
        assert!(load(&store, &addr("alice")).unwrap().is_empty());
    }

    #[test]
    fn empty_stored_value_is_empty_history() {
        let store = NullStore::new();
        let a = addr("alice");
        store.put(derive_history_key(&a).as_bytes(), b"").unwrap();
        assert!(load(&store, &a).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store = NullStore::new();
        let a = addr("alice");
        let records = vec![
            StakeRecord::new(a.clone(), 1_000, Timestamp::new(10)),
            StakeRecord::new(a.clone(), 250, Timestamp::new(99)),
        ];
        save(&store, &a, &records).unwrap();
        assert_eq!(load(&store, &a).unwrap(), records);

        // Re-saving what was loaded reproduces the same bytes.
        let before = store.snapshot();
        save(&store, &a, &load(&store, &a).unwrap()).unwrap();
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn wire_format_uses_named_fields() {
        let a = addr("alice");
        let bytes = encode(&[StakeRecord::new(a, 7, Timestamp::new(3))]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"[{"address":"alice","amount":7,"time":3}]"#
        );
    }

    #[test]
    fn amounts_beyond_u64_roundtrip() {
        let a = addr("whale");
        let big = u128::from(u64::MAX) * 1_000;
        let records = vec![StakeRecord::new(a, big, Timestamp::new(1))];
        assert_eq!(decode(&encode(&records).unwrap()).unwrap(), records);
    }

    #[test]
    fn garbage_is_corruption() {
        let store = NullStore::new();
        let a = addr("alice");
        store.put(derive_history_key(&a).as_bytes(), b"{not json").unwrap();
        assert!(matches!(load(&store, &a), Err(StakeError::Corruption(_))));
    }

    #[test]
    fn foreign_record_is_corruption() {
        let store = NullStore::new();
        let a = addr("alice");
        let records = vec![StakeRecord::new(addr("mallory"), 5, Timestamp::new(1))];
        store
            .put(derive_history_key(&a).as_bytes(), &encode(&records).unwrap())
            .unwrap();
        assert!(matches!(load(&store, &a), Err(StakeError::Corruption(_))));
    }

    #[test]
    fn read_failure_is_store_error() {
        let store = NullStore::new();
        store.fail_reads();
        assert!(matches!(load(&store, &addr("alice")), Err(StakeError::Store(_))));
    }

    #[test]
    fn write_failure_is_store_error() {
        let store = NullStore::new();
        store.fail_writes_after(0);
        let a = addr("alice");
        let result = save(&store, &a, &[StakeRecord::new(a.clone(), 1, Timestamp::new(1))]);
        assert!(matches!(result, Err(StakeError::Store(_))));
    }

    #[test]
    fn remove_clears_history() {
        let store = NullStore::new();
        let a = addr("alice");
        save(&store, &a, &[StakeRecord::new(a.clone(), 1, Timestamp::new(1))]).unwrap();
        remove(&store, &a).unwrap();
        assert!(load(&store, &a).unwrap().is_empty());
        assert!(store.is_empty());
    }
}
