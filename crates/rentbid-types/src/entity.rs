use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of ledger record a lookup or error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Auction,
    Owner,
    Renter,
    /// Any registered participant, when the role does not matter.
    Participant,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auction => "auction",
            Self::Owner => "owner",
            Self::Renter => "renter",
            Self::Participant => "participant",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
