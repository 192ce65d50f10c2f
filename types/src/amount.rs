//! Decimal-string quantities for amounts and fees.
//!
//! Monetary values never pass through floating point. They are carried as the
//! exact text the caller supplied, which must look like `digits "." digits`.
//! No normalisation is applied: `"10.50"` and `"10.5"` are different values
//! for hashing purposes.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::StelsError;

/// A non-negative decimal quantity with an explicit fractional part.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DecimalAmount(String);

impl DecimalAmount {
    /// Parse a decimal string, rejecting anything not matching `^\d+\.\d+$`.
    pub fn parse(text: &str) -> Result<Self, StelsError> {
        if Self::is_valid(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(StelsError::InvalidDecimal(text.to_string()))
        }
    }

    /// Whether `text` is a well-formed decimal amount.
    pub fn is_valid(text: &str) -> bool {
        let Some((int_part, frac_part)) = text.split_once('.') else {
            return false;
        };
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        all_digits(int_part) && all_digits(frac_part)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DecimalAmount {
    type Err = StelsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for DecimalAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
