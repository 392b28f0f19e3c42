use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;

/// A stored value together with the version of the write that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedValue {
    pub version: u64,
    pub value: Vec<u8>,
}

/// The reads and writes of one transaction, applied together.
///
/// `read_set` maps every key the transaction read to the version it saw
/// (`None` when the key was absent). `writes` maps keys to their new value,
/// with `None` meaning delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    pub read_set: BTreeMap<String, Option<u64>>,
    pub writes: BTreeMap<String, Option<Vec<u8>>>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the batch writes nothing.
    pub fn is_read_only(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Versioned key-value ledger.
///
/// All implementations must satisfy these invariants:
/// - `get` only ever returns committed data.
/// - Every successful write gets a version strictly greater than any version
///   previously handed out by the store.
/// - `apply` is all-or-nothing: either every read in the batch still matches
///   the current version and every write lands, or nothing changes.
/// - All backend errors are propagated, never silently ignored.
pub trait LedgerStore: Send + Sync {
    /// Read the current value of a key.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &str) -> StoreResult<Option<VersionedValue>>;

    /// Write a value unconditionally and return its new version.
    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64>;

    /// Delete a key. Returns `true` if it existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Validate the batch's read set and apply its writes atomically.
    ///
    /// Returns the version assigned to the batch's writes. Fails with
    /// [`StoreError::Conflict`](crate::StoreError::Conflict) if any key read
    /// by the batch has changed.
    fn apply(&self, batch: WriteBatch) -> StoreResult<u64>;

    /// Check whether a key exists.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}
