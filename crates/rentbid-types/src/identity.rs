use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Ledger keys are composed with NUL separators, so identifiers must not
/// carry one themselves.
fn validate(kind: &'static str, id: &str) -> Result<(), TypeError> {
    if id.is_empty() {
        return Err(TypeError::EmptyId { kind });
    }
    if id.contains('\u{0}') {
        return Err(TypeError::NulInId {
            kind,
            id: id.to_string(),
        });
    }
    Ok(())
}

/// Ledger value that stands for "no participant", e.g. an auction without a
/// winner. No participant may use it as an id.
pub const NO_PARTICIPANT: &str = "nobody";

/// Identifier of a registered participant (bot owner or renter).
///
/// Participant records are stored in the ledger under this identifier, so the
/// id doubles as the record's key.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        validate("participant", &id)?;
        if id == NO_PARTICIPANT {
            return Err(TypeError::ReservedId { id });
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ParticipantId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ParticipantId> for String {
    fn from(id: ParticipantId) -> Self {
        id.0
    }
}

impl fmt::Debug for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParticipantId({})", self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger key of an auction record, chosen by the caller at creation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuctionKey(String);

impl AuctionKey {
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        validate("auction", &key)?;
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuctionKey {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuctionKey> for String {
    fn from(key: AuctionKey) -> Self {
        key.0
    }
}

impl fmt::Debug for AuctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuctionKey({})", self.0)
    }
}

impl fmt::Display for AuctionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
