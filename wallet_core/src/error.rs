use stels_transactions::TransactionError;
use thiserror::Error;

/// Failures talking to a node.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NodeError {
    /// Non-2xx status. `message` comes from the response body when it has
    /// one, otherwise from the status reason phrase.
    #[error("node returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// 2xx status with an error-shaped body or `success: false`.
    #[error("node rejected transaction: {0}")]
    Rejected(String),

    #[error("malformed node response: {0}")]
    MalformedResponse(String),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("key error: {0}")]
    Key(String),

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("config error: {0}")]
    Config(String),

    #[error("no node connection configured")]
    NoNodeConnection,
}
