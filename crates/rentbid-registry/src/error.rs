//! Error types for registry operations.

use rentbid_store::StoreError;
use rentbid_types::EntityKind;
use thiserror::Error;

/// Errors from reading or staging a participant record inside a transaction.
#[derive(Debug, Error)]
pub enum RecordError {
    /// No record of the requested kind is stored under the identifier.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The ledger store failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for RecordError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Serialization(msg) => Self::Serialization(msg),
            other => Self::Store(other),
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Errors from registration and lookups.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The identifier is already taken.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },

    #[error(transparent)]
    Record(#[from] RecordError),
}

impl From<StoreError> for RegistryError {
    fn from(e: StoreError) -> Self {
        Self::Record(e.into())
    }
}

/// Result alias for transaction-scoped record access.
pub type RecordResult<T> = std::result::Result<T, RecordError>;

/// Convenience type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
