use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

/// Configuration for the auction engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuctionConfig {
    /// Minimum increment assigned to newly created auctions.
    pub default_step: NonZeroU64,
}

impl Default for AuctionConfig {
    fn default() -> Self {
        Self {
            default_step: NonZeroU64::MIN,
        }
    }
}
