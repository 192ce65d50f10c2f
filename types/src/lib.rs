//! Fundamental types for STELS asset transactions.
//!
//! This crate defines the plain data shared by every other crate in the workspace:
//! addresses, decimal amounts, hashes, millisecond timestamps, key material and
//! the token genesis document a transaction is built against.

pub mod address;
pub mod amount;
pub mod error;
pub mod genesis;
pub mod hash;
pub mod keys;
pub mod network;
pub mod time;

pub use address::WalletAddress;
pub use amount::DecimalAmount;
pub use error::StelsError;
pub use genesis::{DomainValue, TokenGenesisDocument};
pub use hash::TxHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use network::NetworkRef;
pub use time::Timestamp;
