use std::collections::BTreeMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::{LedgerStore, VersionedValue, WriteBatch};

/// In-memory, `BTreeMap`-based ledger store.
///
/// Intended for tests, embedding, and the file-backed CLI. All entries live
/// behind a single `RwLock`, so [`LedgerStore::apply`] validates and writes a
/// whole batch while holding one write guard.
pub struct InMemoryLedgerStore {
    state: RwLock<StoreState>,
}

#[derive(Default)]
struct StoreState {
    version: u64,
    entries: BTreeMap<String, VersionedValue>,
}

impl StoreState {
    fn next_version(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

/// Serializable image of an [`InMemoryLedgerStore`].
///
/// Values are kept as UTF-8 text so a saved ledger stays readable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: u64,
    pub entries: BTreeMap<String, SnapshotEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub version: u64,
    pub value: String,
}

impl InMemoryLedgerStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: LedgerSnapshot) -> StoreResult<Self> {
        let mut entries = BTreeMap::new();
        for (key, entry) in snapshot.entries {
            if entry.version > snapshot.version {
                return Err(StoreError::Serialization(format!(
                    "entry {key:?} has version {} beyond snapshot version {}",
                    entry.version, snapshot.version
                )));
            }
            entries.insert(
                key,
                VersionedValue {
                    version: entry.version,
                    value: entry.value.into_bytes(),
                },
            );
        }
        Ok(Self {
            state: RwLock::new(StoreState {
                version: snapshot.version,
                entries,
            }),
        })
    }

    /// Capture the committed state.
    pub fn snapshot(&self) -> StoreResult<LedgerSnapshot> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        let mut entries = BTreeMap::new();
        for (key, stored) in &state.entries {
            let value = String::from_utf8(stored.value.clone()).map_err(|e| {
                StoreError::Serialization(format!("value of {key:?} is not UTF-8: {e}"))
            })?;
            entries.insert(
                key.clone(),
                SnapshotEntry {
                    version: stored.version,
                    value,
                },
            );
        }
        Ok(LedgerSnapshot {
            version: state.version,
            entries,
        })
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self
            .state
            .read()
            .map_err(|_| StoreError::LockPoisoned)?
            .entries
            .len())
    }

    /// Returns `true` if the store holds no keys.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// The highest version handed out so far.
    pub fn version(&self) -> StoreResult<u64> {
        Ok(self.state.read().map_err(|_| StoreError::LockPoisoned)?.version)
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn get(&self, key: &str) -> StoreResult<Option<VersionedValue>> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(state.entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> StoreResult<u64> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let version = state.next_version();
        state
            .entries
            .insert(key.to_string(), VersionedValue { version, value });
        Ok(version)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let existed = state.entries.remove(key).is_some();
        if existed {
            state.next_version();
        }
        Ok(existed)
    }

    fn apply(&self, batch: WriteBatch) -> StoreResult<u64> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;

        for (key, read) in &batch.read_set {
            let current = state.entries.get(key).map(|v| v.version);
            if current != *read {
                warn!(key = ?key, ?read, ?current, "transaction read set is stale");
                return Err(StoreError::Conflict {
                    key: key.clone(),
                    read: *read,
                    current,
                });
            }
        }

        if batch.is_read_only() {
            return Ok(state.version);
        }

        let version = state.next_version();
        let write_count = batch.writes.len();
        for (key, value) in batch.writes {
            match value {
                Some(value) => {
                    state.entries.insert(key, VersionedValue { version, value });
                }
                None => {
                    state.entries.remove(&key);
                }
            }
        }
        debug!(version, write_count, "batch committed");
        Ok(version)
    }
}

impl std::fmt::Debug for InMemoryLedgerStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = f.debug_struct("InMemoryLedgerStore");
        match self.len() {
            Ok(count) => out.field("key_count", &count),
            Err(_) => out.field("key_count", &"<poisoned>"),
        };
        out.finish()
    }
}
