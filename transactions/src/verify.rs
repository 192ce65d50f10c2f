//! Independent verification of signed asset transfers.

use stels_crypto::{verify_hash, ALGORITHM};
use stels_types::{PublicKey, Signature, TokenGenesisDocument, TxHash};

use crate::asset::AssetTransaction;
use crate::error::TransactionError;
use crate::validation::resolve_sign_domain;

/// Re-derive the hash of `tx` and check every signature under `domain`.
///
/// Returns the re-derived hash on success.
pub fn verify_transaction(
    tx: &AssetTransaction,
    domain: &[String],
) -> Result<TxHash, TransactionError> {
    if tx.signatures().is_empty() {
        return Err(TransactionError::MissingSignature);
    }
    let tx_hash = tx.tx_hash()?;

    for record in tx.signatures() {
        if record.alg != ALGORITHM {
            return Err(TransactionError::UnsupportedAlgorithm(record.alg.clone()));
        }
        let invalid = || TransactionError::InvalidSignature {
            kid: record.kid.clone(),
            tx_hash: tx_hash.to_hex(),
        };
        let public = PublicKey::from_hex(&record.kid).map_err(|_| invalid())?;
        let sig = Signature::from_hex(&record.sig).map_err(|_| invalid())?;
        if !verify_hash(&tx_hash, domain, &sig, &public) {
            return Err(invalid());
        }
    }
    Ok(tx_hash)
}

/// Verify `tx` under the token signing domain declared by `genesis`.
pub fn verify_with_genesis(
    tx: &AssetTransaction,
    genesis: &TokenGenesisDocument,
) -> Result<TxHash, TransactionError> {
    let domain = resolve_sign_domain(genesis)?;
    verify_transaction(tx, &domain)
}
