use std::fmt;

use rentbid_types::LedgerTimestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of one ledger invocation.
///
/// Unique across invocations, so keys derived from it never collide between
/// concurrent calls.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvocationId(String);

impl InvocationId {
    /// Generate a fresh time-ordered (UUID v7) identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wrap an identifier supplied by the execution harness.
    pub fn from_raw(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InvocationId({})", self.0)
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the harness tells an operation about the call it is running in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    id: InvocationId,
    timestamp: LedgerTimestamp,
}

impl Invocation {
    /// Start an invocation now, with a freshly generated id.
    pub fn begin() -> Self {
        Self {
            id: InvocationId::generate(),
            timestamp: LedgerTimestamp::now(),
        }
    }

    /// An invocation with an explicit id and time.
    pub fn new(id: InvocationId, timestamp: LedgerTimestamp) -> Self {
        Self { id, timestamp }
    }

    pub fn id(&self) -> &InvocationId {
        &self.id
    }

    /// The invocation's notion of "now".
    pub fn timestamp(&self) -> &LedgerTimestamp {
        &self.timestamp
    }
}
