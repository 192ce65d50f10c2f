use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid private key: not a valid secp256k1 scalar")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("random number generator failure: {0}")]
    Rng(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("unknown address format `{0}` (expected `basic` or `checksummed`)")]
    UnknownAddressFormat(String),
}
