use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("{kind} identifier must not be empty")]
    EmptyId { kind: &'static str },

    #[error("{kind} identifier contains a NUL character: {id:?}")]
    NulInId { kind: &'static str, id: String },

    #[error("{id:?} is reserved and cannot identify a participant")]
    ReservedId { id: String },

    #[error("invalid ledger timestamp {value:?}: expected 14 digits YYYYMMDDHHMMSS")]
    InvalidTimestamp { value: String },
}
