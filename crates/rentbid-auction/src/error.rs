use rentbid_registry::RecordError;
use rentbid_store::StoreError;
use rentbid_types::{EntityKind, LedgerTimestamp};

/// Errors that can occur during auction operations.
#[derive(Debug, thiserror::Error)]
pub enum AuctionError {
    /// The referenced auction or participant does not exist.
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// An auction is already stored under the key.
    #[error("{kind} already exists: {id}")]
    AlreadyExists { kind: EntityKind, id: String },

    /// The offered price does not clear the step threshold.
    #[error("incorrectly offered price {offered}, enter a price of at least {minimum}")]
    InvalidBid { offered: u64, minimum: u64 },

    /// The auction's deadline has passed.
    #[error("auction {auction} expired at {expired_at}")]
    Expired {
        auction: String,
        expired_at: LedgerTimestamp,
    },

    /// The auction has been settled and accepts no more bids.
    #[error("auction {0} is closed")]
    Closed(String),

    /// The renter's balance does not cover the clearing price.
    #[error("not enough funds: renter {renter} has {balance}, bid requires {required}")]
    InsufficientFunds {
        renter: String,
        balance: i64,
        required: u64,
    },

    /// Settlement was attempted with no recorded bids.
    #[error("no bids have been placed, cannot end auction {0}")]
    NoBids(String),

    /// The invocation tried to record a bid under a key already in use.
    #[error("bid key already recorded: {0:?}")]
    DuplicateBid(String),

    /// A record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The ledger store failed.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AuctionError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Serialization(msg) => Self::Serialization(msg),
            other => Self::Store(other),
        }
    }
}

impl From<RecordError> for AuctionError {
    fn from(e: RecordError) -> Self {
        match e {
            RecordError::NotFound { kind, id } => Self::NotFound { kind, id },
            RecordError::Serialization(msg) => Self::Serialization(msg),
            RecordError::Store(e) => Self::Store(e),
        }
    }
}

/// Result alias for auction operations.
pub type AuctionResult<T> = Result<T, AuctionError>;
