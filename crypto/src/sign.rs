//! Domain-separated secp256k1 ECDSA over transaction hashes.
//!
//! The signed message is never the raw transaction. It is the preimage
//!
//! ```text
//! for each domain element: u32_be(len) || utf8(element)
//! tx_hash (32 raw bytes)
//! ```
//!
//! which ECDSA then digests with SHA-256 (RFC 6979 nonces, low-S). Binding the
//! ordered domain into the preimage means a signature made for one network or
//! purpose does not verify under any other domain.

use k256::ecdsa::signature::{Signer, Verifier};
use stels_types::{PrivateKey, PublicKey, Signature, TxHash};

use crate::error::CryptoError;
use crate::keys::{signing_key, verifying_key};

/// Algorithm tag carried in signature records.
pub const ALGORITHM: &str = "ecdsa-secp256k1";

/// Build the byte string that is actually signed for `hash` under `domain`.
pub fn signing_preimage(hash: &TxHash, domain: &[String]) -> Vec<u8> {
    let domain_len: usize = domain.iter().map(|d| 4 + d.len()).sum();
    let mut preimage = Vec::with_capacity(domain_len + 32);
    for element in domain {
        preimage.extend_from_slice(&(element.len() as u32).to_be_bytes());
        preimage.extend_from_slice(element.as_bytes());
    }
    preimage.extend_from_slice(hash.as_bytes());
    preimage
}

/// Sign a transaction hash under a signing domain.
pub fn sign_hash(
    hash: &TxHash,
    domain: &[String],
    private_key: &PrivateKey,
) -> Result<Signature, CryptoError> {
    let key = signing_key(private_key)?;
    let preimage = signing_preimage(hash, domain);
    let sig: k256::ecdsa::Signature = key
        .try_sign(&preimage)
        .map_err(|e| CryptoError::Signing(e.to_string()))?;
    let sig = sig.normalize_s().unwrap_or(sig);
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&sig.to_bytes());
    Ok(Signature(bytes))
}

/// Verify a signature over `hash` under `domain` against a public key.
///
/// Returns `false` for malformed keys or signatures and for high-S encodings.
pub fn verify_hash(
    hash: &TxHash,
    domain: &[String],
    signature: &Signature,
    public_key: &PublicKey,
) -> bool {
    let Ok(key) = verifying_key(public_key) else {
        return false;
    };
    let Ok(sig) = k256::ecdsa::Signature::from_slice(signature.as_bytes()) else {
        return false;
    };
    key.verify(&signing_preimage(hash, domain), &sig).is_ok()
}
