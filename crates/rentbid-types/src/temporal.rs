use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// `chrono` format string of the canonical ledger timestamp.
pub const LEDGER_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

const LEDGER_TIMESTAMP_LEN: usize = 14;

/// Fixed-width `YYYYMMDDHHMMSS` timestamp.
///
/// Because every value has exactly 14 digits, lexicographic order of the
/// underlying string equals chronological order. Ordering is derived from the
/// string and never goes through a calendar conversion, so expiration checks
/// compare exactly what the ledger stores.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LedgerTimestamp(String);

impl LedgerTimestamp {
    /// Parse a 14-digit timestamp.
    pub fn parse(value: &str) -> Result<Self, TypeError> {
        if value.len() != LEDGER_TIMESTAMP_LEN || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeError::InvalidTimestamp {
                value: value.to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Format a UTC instant in the canonical ledger form.
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.format(LEDGER_TIMESTAMP_FORMAT).to_string())
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Returns `true` if this timestamp is strictly before `other`.
    pub fn is_before(&self, other: &Self) -> bool {
        self < other
    }

    /// Interpret the digits as a calendar instant.
    ///
    /// Returns `None` when the digits do not name a real date (for example a
    /// thirteenth month); such values still order correctly as strings.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        NaiveDateTime::parse_from_str(&self.0, LEDGER_TIMESTAMP_FORMAT)
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LedgerTimestamp {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LedgerTimestamp {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LedgerTimestamp> for String {
    fn from(ts: LedgerTimestamp) -> Self {
        ts.0
    }
}

impl fmt::Debug for LedgerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LedgerTimestamp({})", self.0)
    }
}

impl fmt::Display for LedgerTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
