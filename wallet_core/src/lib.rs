//! Wallet core library for STELS.
//!
//! Provides everything a wallet application needs to move tokens:
//! - Key generation and restoration (secp256k1)
//! - Argon2id + AES-256-GCM encrypted keystore files
//! - Building and signing asset transfers against a genesis document
//! - Submitting signed transfers to a node
//! - TOML wallet configuration

pub mod config;
pub mod error;
pub mod keystore;
pub mod node_client;
pub mod wallet;

pub use config::WalletConfig;
pub use error::{NodeError, WalletError};
pub use keystore::{
    decrypt_keystore, encrypt_keystore, load_keystore, save_keystore, KdfParams, KeystoreFile,
};
pub use node_client::{NodeClient, NodeResponse, SubmitEnvelope, SubmitResult};
pub use wallet::Wallet;
