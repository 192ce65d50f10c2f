use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("invalid recipient address: {0:?}")]
    InvalidRecipient(String),

    #[error("invalid amount format: {0:?} (expected digits \".\" digits)")]
    InvalidAmountFormat(String),

    #[error("invalid fee format: {0:?} (expected digits \".\" digits)")]
    InvalidFeeFormat(String),

    #[error("invalid sign domain: {0}")]
    InvalidSignDomain(String),

    #[error("non-canonical number in transaction: {0}")]
    NonCanonicalNumber(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("signing error: {0}")]
    Signing(String),

    #[error("invalid signature by {kid} on transaction {tx_hash}")]
    InvalidSignature { kid: String, tx_hash: String },

    #[error("unsupported signature algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("transaction carries no signatures")]
    MissingSignature,
}
