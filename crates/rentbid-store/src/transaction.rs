use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreResult;
use crate::traits::{LedgerStore, WriteBatch};

/// One invocation's view of the ledger.
///
/// Reads go to the store on first access and are remembered together with the
/// version seen; later reads of a key the transaction has written return the
/// pending value. Nothing reaches the store until [`Transaction::commit`],
/// which hands the read set and write set to [`LedgerStore::apply`]. Dropping
/// a transaction discards its writes.
pub struct Transaction<'s, S: LedgerStore + ?Sized> {
    store: &'s S,
    read_set: BTreeMap<String, Option<u64>>,
    writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl<'s, S: LedgerStore + ?Sized> Transaction<'s, S> {
    pub fn begin(store: &'s S) -> Self {
        Self {
            store,
            read_set: BTreeMap::new(),
            writes: BTreeMap::new(),
        }
    }

    /// Read a key, seeing this transaction's own pending writes.
    pub fn get(&mut self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        if let Some(pending) = self.writes.get(key) {
            return Ok(pending.clone());
        }
        let stored = self.store.get(key)?;
        self.read_set
            .entry(key.to_string())
            .or_insert_with(|| stored.as_ref().map(|v| v.version));
        Ok(stored.map(|v| v.value))
    }

    /// Returns `true` if the key exists from this transaction's point of view.
    pub fn exists(&mut self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }

    pub fn put(&mut self, key: &str, value: Vec<u8>) {
        self.writes.insert(key.to_string(), Some(value));
    }

    pub fn delete(&mut self, key: &str) {
        self.writes.insert(key.to_string(), None);
    }

    /// Read and decode a JSON record.
    pub fn get_json<T: DeserializeOwned>(&mut self, key: &str) -> StoreResult<Option<T>> {
        match self.get(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Encode and stage a JSON record.
    pub fn put_json<T: Serialize>(&mut self, key: &str, record: &T) -> StoreResult<()> {
        let bytes = serde_json::to_vec(record)?;
        self.put(key, bytes);
        Ok(())
    }

    /// Number of staged writes.
    pub fn pending_writes(&self) -> usize {
        self.writes.len()
    }

    /// Apply every staged write, or none of them.
    pub fn commit(self) -> StoreResult<u64> {
        self.store.apply(WriteBatch {
            read_set: self.read_set,
            writes: self.writes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::InMemoryLedgerStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Record {
        n: u32,
    }

    #[test]
    fn writes_are_invisible_until_commit() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        tx.put("k", b"v".to_vec());
        assert!(store.get("k").unwrap().is_none());
        assert_eq!(tx.get("k").unwrap(), Some(b"v".to_vec()));

        tx.commit().unwrap();
        assert_eq!(store.get("k").unwrap().unwrap().value, b"v");
    }

    #[test]
    fn dropped_transaction_leaves_store_untouched() {
        let store = InMemoryLedgerStore::new();
        {
            let mut tx = Transaction::begin(&store);
            tx.put("k", b"v".to_vec());
            assert_eq!(tx.pending_writes(), 1);
        }
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn json_roundtrip_through_store() {
        let store = InMemoryLedgerStore::new();
        let mut tx = Transaction::begin(&store);
        tx.put_json("r", &Record { n: 7 }).unwrap();
        tx.commit().unwrap();

        let mut tx = Transaction::begin(&store);
        assert_eq!(tx.get_json::<Record>("r").unwrap(), Some(Record { n: 7 }));
        assert_eq!(tx.get_json::<Record>("missing").unwrap(), None);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let store = InMemoryLedgerStore::new();
        store.put("r", b"not json".to_vec()).unwrap();
        let mut tx = Transaction::begin(&store);
        assert!(matches!(
            tx.get_json::<Record>("r"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn concurrent_commit_on_same_key_conflicts() {
        let store = InMemoryLedgerStore::new();
        store.put("auction", b"0".to_vec()).unwrap();

        let mut first = Transaction::begin(&store);
        let mut second = Transaction::begin(&store);
        first.get("auction").unwrap();
        second.get("auction").unwrap();
        first.put("auction", b"1".to_vec());
        second.put("auction", b"2".to_vec());

        first.commit().unwrap();
        assert!(matches!(second.commit(), Err(StoreError::Conflict { .. })));
        assert_eq!(store.get("auction").unwrap().unwrap().value, b"1");
    }

    #[test]
    fn delete_is_staged() {
        let store = InMemoryLedgerStore::new();
        store.put("k", b"v".to_vec()).unwrap();
        let mut tx = Transaction::begin(&store);
        assert!(tx.exists("k").unwrap());
        tx.delete("k");
        assert!(!tx.exists("k").unwrap());
        assert!(store.exists("k").unwrap());
        tx.commit().unwrap();
        assert!(!store.exists("k").unwrap());
    }
}
