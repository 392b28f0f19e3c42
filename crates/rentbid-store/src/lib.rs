//! Ledger boundary for rentbid.
//!
//! The ledger of record is an external versioned key-value store. This crate
//! defines the contract rentbid needs from it and a faithful in-memory
//! implementation for tests, embedding, and the command-line tool.
//!
//! # Components
//!
//! - [`LedgerStore`]: get/put/delete plus an atomic, version-checked batch apply
//! - [`InMemoryLedgerStore`]: `BTreeMap`-backed store with snapshot/restore
//! - [`Transaction`]: buffers one invocation's reads and writes and commits them all-or-nothing
//! - [`Invocation`]: the invocation id and current time supplied by the caller
//! - [`composite_key`]: deterministic multi-attribute key derivation
//!
//! # Design Rules
//!
//! 1. Every write carries a store-wide version; readers see only committed data.
//! 2. A transaction commits only if nothing it read changed since it read it.
//! 3. A transaction that is dropped without commit leaves the store untouched.
//! 4. The store never interprets values; encoding belongs to the callers.

pub mod error;
pub mod invocation;
pub mod keys;
pub mod memory;
pub mod traits;
pub mod transaction;

pub use error::{StoreError, StoreResult};
pub use invocation::{Invocation, InvocationId};
pub use keys::{composite_key, split_composite_key};
pub use memory::{InMemoryLedgerStore, LedgerSnapshot, SnapshotEntry};
pub use traits::{LedgerStore, VersionedValue, WriteBatch};
pub use transaction::Transaction;
