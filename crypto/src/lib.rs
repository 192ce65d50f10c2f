//! Cryptographic primitives for STELS transactions.
//!
//! - **SHA-256** for transaction content hashes
//! - **secp256k1 ECDSA** (RFC 6979, low-S) for domain-separated signatures
//! - Checksummed `0x` address derivation from public keys

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{decode_address, derive_address, validate_address, AddressFormat};
pub use error::CryptoError;
pub use hash::{hash_canonical, sha256};
pub use keys::{generate_keypair, keypair_from_private, public_from_private};
pub use sign::{sign_hash, signing_preimage, verify_hash, ALGORITHM};
