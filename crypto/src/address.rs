//! Wallet address formats.
//!
//! Two address schemes are recognised:
//!
//! - [`AddressFormat::Basic`]: 1..=128 ASCII characters drawn from
//!   alphanumerics and `_ - : .`. Used by networks whose addresses are opaque
//!   identifiers.
//! - [`AddressFormat::Checksummed`]: `0x` + hex(key_id) + hex(checksum), where
//!   `key_id` is the last 20 bytes of SHA-256(compressed public key) and
//!   `checksum` is the first 4 bytes of SHA-256(SHA-256(key_id)). Total
//!   length 2 + 40 + 8 = 50 characters, lowercase hex.

use serde::{Deserialize, Serialize};
use stels_types::{PublicKey, WalletAddress};

use crate::error::CryptoError;
use crate::hash::sha256;

const PREFIX: &str = "0x";
const KEY_ID_LEN: usize = 20;
const CHECKSUM_LEN: usize = 4;
const CHECKSUMMED_LEN: usize = PREFIX.len() + 2 * (KEY_ID_LEN + CHECKSUM_LEN);
const BASIC_MAX_LEN: usize = 128;

/// Address scheme a network uses for `from`/`to` fields.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    #[default]
    Basic,
    Checksummed,
}

impl AddressFormat {
    /// Check `address` against this scheme.
    pub fn validate(&self, address: &str) -> bool {
        match self {
            Self::Basic => is_basic_address(address),
            Self::Checksummed => decode_address(address).is_some(),
        }
    }
}

impl std::str::FromStr for AddressFormat {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "checksummed" => Ok(Self::Checksummed),
            _ => Err(CryptoError::UnknownAddressFormat(s.to_string())),
        }
    }
}

fn is_basic_address(address: &str) -> bool {
    !address.is_empty()
        && address.len() <= BASIC_MAX_LEN
        && address
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b':' | b'.'))
}

fn checksum(key_id: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = sha256(&sha256(key_id));
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

/// Derive a checksummed `0x` address from a public key.
pub fn derive_address(public_key: &PublicKey) -> WalletAddress {
    let digest = sha256(public_key.as_bytes());
    let key_id = &digest[32 - KEY_ID_LEN..];
    WalletAddress::new(format!(
        "{}{}{}",
        PREFIX,
        hex::encode(key_id),
        hex::encode(checksum(key_id))
    ))
}

/// Extract the 20-byte key id from a checksummed address.
///
/// Returns `None` if the address is malformed or has an invalid checksum.
/// Only lowercase hex is accepted so that every key id has exactly one
/// textual form.
pub fn decode_address(address: &str) -> Option<[u8; KEY_ID_LEN]> {
    let encoded = address.strip_prefix(PREFIX)?;
    if address.len() != CHECKSUMMED_LEN
        || encoded.bytes().any(|b| b.is_ascii_uppercase())
    {
        return None;
    }
    let mut raw = [0u8; KEY_ID_LEN + CHECKSUM_LEN];
    hex::decode_to_slice(encoded, &mut raw).ok()?;
    let (key_id, check) = raw.split_at(KEY_ID_LEN);
    if check != checksum(key_id) {
        return None;
    }
    let mut out = [0u8; KEY_ID_LEN];
    out.copy_from_slice(key_id);
    Some(out)
}

/// Validate that an address string is well-formed under `format`.
pub fn validate_address(address: &str, format: AddressFormat) -> bool {
    format.validate(address)
}
