use rentbid_registry::RecordError;
use rentbid_store::StoreError;
use rentbid_types::EntityKind;

/// Errors that can occur while rating participants.
#[derive(Debug, thiserror::Error)]
pub enum ReputationError {
    /// The participant to rate does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// An evaluation factor is outside its permitted range.
    #[error("wrong parameters for evaluating: {factor} = {value} is outside {range}")]
    InvalidParameters {
        factor: &'static str,
        value: f64,
        range: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ReputationError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Serialization(msg) => Self::Serialization(msg),
            other => Self::Store(other),
        }
    }
}

impl From<RecordError> for ReputationError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { kind, id } => Self::NotFound { kind, id },
            RecordError::Serialization(msg) => Self::Serialization(msg),
            RecordError::Store(e) => Self::Store(e),
        }
    }
}

/// Result alias for reputation operations.
pub type ReputationResult<T> = Result<T, ReputationError>;
