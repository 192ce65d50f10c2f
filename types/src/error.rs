//! Top-level error type shared across crates.

use thiserror::Error;

/// Common low-level error type for STELS types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StelsError {
    #[error("invalid decimal amount: {0:?}")]
    InvalidDecimal(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
