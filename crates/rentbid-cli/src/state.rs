//! File-backed ledger: a JSON snapshot of the in-memory store.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use rentbid_store::{InMemoryLedgerStore, LedgerSnapshot};
use tracing::debug;

/// Load the ledger from `path`. A missing file is an empty ledger.
pub fn open_ledger(path: &Path) -> anyhow::Result<InMemoryLedgerStore> {
    if !path.exists() {
        debug!(path = %path.display(), "starting with an empty ledger");
        return Ok(InMemoryLedgerStore::new());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading ledger {}", path.display()))?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&text)
        .with_context(|| format!("decoding ledger {}", path.display()))?;
    let store = InMemoryLedgerStore::from_snapshot(snapshot)?;
    let keys = store.len()?;
    debug!(path = %path.display(), keys, "ledger loaded");
    Ok(store)
}

/// Write the ledger to `path`, replacing the previous file atomically.
pub fn save_ledger(store: &InMemoryLedgerStore, path: &Path) -> anyhow::Result<()> {
    let snapshot = store.snapshot()?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut file = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, &snapshot)?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("writing ledger {}", path.display()))?;
    debug!(path = %path.display(), version = snapshot.version, "ledger saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentbid_store::LedgerStore;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = open_ledger(&dir.path().join("ledger.json")).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn save_then_open_restores_entries_and_versions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.json");

        let store = InMemoryLedgerStore::new();
        store.put("alice", br#"{"renter_id":"alice"}"#.to_vec()).unwrap();
        store.put("k\u{0}bid\u{0}", b"{}".to_vec()).unwrap();
        save_ledger(&store, &path).unwrap();

        let reopened = open_ledger(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 2);
        assert_eq!(reopened.version().unwrap(), 2);
        let alice = reopened.get("alice").unwrap().unwrap();
        assert_eq!(alice.version, 1);
        assert_eq!(alice.value, br#"{"renter_id":"alice"}"#.to_vec());
        assert!(reopened.exists("k\u{0}bid\u{0}").unwrap());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(open_ledger(&path).is_err());
    }
}
