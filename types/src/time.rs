//! Timestamp type used in transactions.
//!
//! Transaction timestamps are integer milliseconds since the Unix epoch (UTC).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in milliseconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A clock set before the Unix epoch yields zero.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self(millis)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_in_milliseconds() {
        // 2020-01-01 in ms; seconds-based clocks would fall far below this.
        assert!(Timestamp::now().as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn serializes_as_integer() {
        let ts = Timestamp::from_millis(1_700_000_000_000);
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000000");
    }
}
