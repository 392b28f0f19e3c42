/// Errors from ledger store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A key read by the transaction changed before commit.
    #[error("read conflict on {key:?}: read version {read:?}, current version {current:?}")]
    Conflict {
        key: String,
        read: Option<u64>,
        current: Option<u64>,
    },

    /// A composite key could not be built from the given parts.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
