//! Key material for wallet identity and signing.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::StelsError;

/// A 33-byte compressed SEC1 secp256k1 public key.
///
/// Serialized as 66 lowercase hex characters; this is the `kid` carried in
/// a transaction's signature records.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; 33]);

/// A 32-byte secp256k1 secret scalar.
///
/// This type intentionally does not implement `Debug`, `Serialize`, or `Clone`
/// to prevent accidental exposure. Key bytes are zeroized on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey(pub [u8; 32]);

/// A 64-byte compact ECDSA signature (`r || s`, low-S).
#[derive(Clone, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

/// A secp256k1 key pair (public + private).
///
/// Use `stels_crypto::generate_keypair()` or `stels_crypto::keypair_from_private()`
/// to construct key pairs. This struct is intentionally just data.
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl PublicKey {
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, StelsError> {
        let mut bytes = [0u8; 33];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| StelsError::InvalidKey(format!("public key hex: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

impl Signature {
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    /// Lowercase hex encoding (128 characters), the `sig` wire form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, StelsError> {
        let mut bytes = [0u8; 64];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| StelsError::InvalidHex(format!("signature: {e}")))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}..)", hex::encode(&self.0[..8]))
    }
}

impl PrivateKey {
    pub fn from_hex(s: &str) -> Result<Self, StelsError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)
            .map_err(|_| StelsError::InvalidKey("private key must be 64 hex characters".into()))?;
        Ok(Self(bytes))
    }
}
