//! Signing seam between the transaction pipeline and key custody.

use stels_crypto::{sign_hash, ALGORITHM};
use stels_types::{KeyPair, TxHash};

use crate::asset::SignatureRecord;
use crate::error::TransactionError;

/// Something that can sign a transaction hash under a signing domain.
///
/// The wallet's in-memory secp256k1 key is the default implementation;
/// hardware or remote signers implement the same trait.
pub trait TransactionSigner {
    /// Key id written to the signature record (the signer's public key).
    fn kid(&self) -> String;

    /// Algorithm tag written to the signature record.
    fn algorithm(&self) -> &str {
        ALGORITHM
    }

    /// Produce the `sig` text for `hash` under `domain`.
    fn sign_hash(&self, hash: &TxHash, domain: &[String]) -> Result<String, TransactionError>;

    /// Sign and wrap the result in a `{kid, alg, sig}` record.
    fn signature_record(
        &self,
        hash: &TxHash,
        domain: &[String],
    ) -> Result<SignatureRecord, TransactionError> {
        Ok(SignatureRecord {
            kid: self.kid(),
            alg: self.algorithm().to_string(),
            sig: self.sign_hash(hash, domain)?,
        })
    }
}

impl TransactionSigner for KeyPair {
    fn kid(&self) -> String {
        self.public.to_hex()
    }

    fn sign_hash(&self, hash: &TxHash, domain: &[String]) -> Result<String, TransactionError> {
        sign_hash(hash, domain, &self.private)
            .map(|sig| sig.to_hex())
            .map_err(|e| TransactionError::Signing(e.to_string()))
    }
}
