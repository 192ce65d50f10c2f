//! Asset-transfer transaction model.

use serde::{Deserialize, Serialize};
use stels_types::{DecimalAmount, NetworkRef, Timestamp, TxHash, WalletAddress};

use crate::canonical::canonicalize;
use crate::error::TransactionError;

/// The `type` tag of an asset transfer.
pub const ASSET_TRANSFER: &str = "asset.transfer";

/// Every field of an asset transfer except its signatures.
///
/// This is the value that gets canonicalized and hashed. It only ever exists
/// in memory while a transaction is being built or verified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransactionBase {
    #[serde(rename = "type")]
    pub tx_type: String,
    pub version: String,
    pub network: NetworkRef,
    pub token_id: String,
    pub from: WalletAddress,
    pub to: WalletAddress,
    pub amount: DecimalAmount,
    pub fee: DecimalAmount,
    pub currency: String,
    pub timestamp: Timestamp,
    /// Always present on the wire; `null` when the sender has no prior link.
    #[serde(default)]
    pub prev_hash: Option<String>,
    /// Absent from the wire (and the canonical form) when not supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl AssetTransactionBase {
    /// Canonical text of this base.
    pub fn canonical(&self) -> Result<String, TransactionError> {
        canonicalize(self)
    }

    /// SHA-256 content hash of the canonical text.
    pub fn hash(&self) -> Result<TxHash, TransactionError> {
        Ok(stels_crypto::hash_canonical(&self.canonical()?))
    }
}

/// One `{kid, alg, sig}` entry of a signing envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Signer's public key.
    pub kid: String,
    pub alg: String,
    /// Signature over the transaction hash.
    pub sig: String,
}

/// A signed asset transfer, ready for transport.
///
/// Fields are read-only: changing anything (an amended fee, a new memo)
/// means building and signing a new transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransaction {
    #[serde(flatten)]
    base: AssetTransactionBase,
    signatures: Vec<SignatureRecord>,
}

impl AssetTransaction {
    pub(crate) fn assemble(base: AssetTransactionBase, signatures: Vec<SignatureRecord>) -> Self {
        Self { base, signatures }
    }

    pub fn base(&self) -> &AssetTransactionBase {
        &self.base
    }

    pub fn signatures(&self) -> &[SignatureRecord] {
        &self.signatures
    }

    pub fn tx_type(&self) -> &str {
        &self.base.tx_type
    }

    pub fn from(&self) -> &WalletAddress {
        &self.base.from
    }

    pub fn to(&self) -> &WalletAddress {
        &self.base.to
    }

    pub fn amount(&self) -> &DecimalAmount {
        &self.base.amount
    }

    pub fn fee(&self) -> &DecimalAmount {
        &self.base.fee
    }

    pub fn network(&self) -> &NetworkRef {
        &self.base.network
    }

    pub fn timestamp(&self) -> Timestamp {
        self.base.timestamp
    }

    pub fn memo(&self) -> Option<&str> {
        self.base.memo.as_deref()
    }

    pub fn prev_hash(&self) -> Option<&str> {
        self.base.prev_hash.as_deref()
    }

    /// Re-derive the content hash from the transaction's own base.
    pub fn tx_hash(&self) -> Result<TxHash, TransactionError> {
        self.base.hash()
    }

    /// JSON wire form.
    pub fn to_json(&self) -> Result<String, TransactionError> {
        serde_json::to_string(self).map_err(|e| TransactionError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        serde_json::from_str(json).map_err(|e| TransactionError::Serialization(e.to_string()))
    }
}
