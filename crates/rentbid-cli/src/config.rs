use std::path::{Path, PathBuf};

use anyhow::Context;
use rentbid_auction::AuctionConfig;
use serde::{Deserialize, Serialize};

/// Default location of the ledger snapshot.
pub const DEFAULT_STATE_FILE: &str = "rentbid-ledger.json";

/// Configuration of the `rentbid` binary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// JSON snapshot the ledger is loaded from and saved to.
    pub state_file: PathBuf,
    pub auction: AuctionConfig,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            auction: AuctionConfig::default(),
        }
    }
}

impl CliConfig {
    /// Load from a TOML file, or return defaults if the file does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}
