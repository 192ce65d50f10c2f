//! Wallet address type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A STELS wallet address in the network's textual address format.
///
/// The type itself does not enforce a format: networks differ in their
/// address scheme, so structural checks live in `stels_crypto::address`
/// and run when a transaction is built.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for WalletAddress {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
