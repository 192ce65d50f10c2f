//! SHA-256 hashing for transactions.

use sha2::{Digest, Sha256};
use stels_types::TxHash;

/// Compute the SHA-256 digest of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let result = Sha256::digest(data);
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash the UTF-8 bytes of a canonical transaction string.
pub fn hash_canonical(canonical: &str) -> TxHash {
    TxHash::new(sha256(canonical.as_bytes()))
}
