//! Core wallet struct with optional node connectivity.

use stels_crypto::AddressFormat;
use stels_transactions::{
    create_signed_transaction, AssetTransaction, SignedTransfer, TransactionError,
    TransactionSigner, TransferRequest,
};
use stels_types::{KeyPair, PrivateKey, PublicKey, TokenGenesisDocument, TxHash, WalletAddress};

use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keystore::{decrypt_keystore, KeystoreFile};
use crate::node_client::{NodeClient, SubmitResult};

/// A STELS wallet: one secp256k1 key pair and the address it sends from.
///
/// The private key is only ever handed to the signing primitive; it is not
/// logged, displayed or serialized by this type.
pub struct Wallet {
    keys: KeyPair,
    address: WalletAddress,
    address_format: AddressFormat,
    node_client: Option<NodeClient>,
}

impl Wallet {
    fn from_keys(keys: KeyPair) -> Self {
        let address = stels_crypto::derive_address(&keys.public);
        Self {
            keys,
            address,
            address_format: AddressFormat::default(),
            node_client: None,
        }
    }

    /// Create a new wallet with a fresh key pair.
    pub fn create() -> Result<Self, WalletError> {
        let keys = stels_crypto::generate_keypair().map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::from_keys(keys))
    }

    /// Restore a wallet from raw private key bytes.
    pub fn from_private_key(private_key_bytes: &[u8]) -> Result<Self, WalletError> {
        if private_key_bytes.len() != 32 {
            return Err(WalletError::Key(format!(
                "private key must be 32 bytes, got {}",
                private_key_bytes.len()
            )));
        }
        let mut private = PrivateKey([0u8; 32]);
        private.0.copy_from_slice(private_key_bytes);
        let keys = stels_crypto::keypair_from_private(private)
            .map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::from_keys(keys))
    }

    /// Restore a wallet from a 64-character hex private key.
    pub fn from_private_key_hex(hex_key: &str) -> Result<Self, WalletError> {
        let private = PrivateKey::from_hex(hex_key).map_err(|e| WalletError::Key(e.to_string()))?;
        let keys = stels_crypto::keypair_from_private(private)
            .map_err(|e| WalletError::Key(e.to_string()))?;
        Ok(Self::from_keys(keys))
    }

    /// Open an encrypted keystore. The wallet uses the address recorded in it.
    pub fn from_keystore(keystore: &KeystoreFile, password: &str) -> Result<Self, WalletError> {
        let keys = decrypt_keystore(keystore, password)?;
        Ok(Self::from_keys(keys).with_address(keystore.address.clone()))
    }

    /// Use an externally assigned sender address instead of the derived one.
    ///
    /// Some networks hand out addresses that are not derived from the key.
    pub fn with_address(mut self, address: WalletAddress) -> Self {
        self.address = address;
        self
    }

    /// Address scheme recipients are validated against.
    pub fn with_address_format(mut self, address_format: AddressFormat) -> Self {
        self.address_format = address_format;
        self
    }

    /// Apply the relevant parts of a wallet configuration.
    pub fn configure(&mut self, config: &WalletConfig) -> Result<(), WalletError> {
        self.address_format = config.address_format;
        self.node_client = Some(NodeClient::from_config(config)?);
        Ok(())
    }

    pub fn address(&self) -> &WalletAddress {
        &self.address
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.keys.public
    }

    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn address_format(&self) -> AddressFormat {
        self.address_format
    }

    /// Configure the wallet to communicate with a node API endpoint.
    pub fn connect_to_node(&mut self, node_url: &str) -> Result<(), WalletError> {
        self.node_client = Some(NodeClient::new(node_url)?);
        Ok(())
    }

    /// Return a reference to the node client, if connected.
    pub fn node_client(&self) -> Option<&NodeClient> {
        self.node_client.as_ref()
    }

    /// Validate, build and sign an asset transfer from this wallet.
    pub fn create_asset_transaction(
        &self,
        genesis: &TokenGenesisDocument,
        request: &TransferRequest,
    ) -> Result<SignedTransfer, WalletError> {
        Ok(create_signed_transaction(
            self,
            &self.address,
            genesis,
            request,
            self.address_format,
        )?)
    }

    /// Submit an already signed transaction through the connected node.
    pub async fn submit(
        &self,
        tx: &AssetTransaction,
        session: &str,
    ) -> Result<SubmitResult, WalletError> {
        let client = self
            .node_client
            .as_ref()
            .ok_or(WalletError::NoNodeConnection)?;
        Ok(client.submit_asset_transaction(tx, session).await?)
    }
}

impl TransactionSigner for Wallet {
    fn kid(&self) -> String {
        self.keys.kid()
    }

    fn sign_hash(&self, hash: &TxHash, domain: &[String]) -> Result<String, TransactionError> {
        self.keys.sign_hash(hash, domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stels_transactions::verify_with_genesis;

    const GENESIS: &str = r#"{
        "network": {"id": "testnet", "chain_id": 1},
        "protocol": {"tx_version": "1.0", "sign_domains": {"token": ["stels", "testnet", "token"]}},
        "token": {"id": "tok1"},
        "parameters": {"currency": {"symbol": "USDT"}}
    }"#;

    fn genesis() -> TokenGenesisDocument {
        TokenGenesisDocument::from_json(GENESIS).unwrap()
    }

    #[test]
    fn create_derives_checksummed_address() {
        let wallet = Wallet::create().unwrap();
        assert!(stels_crypto::validate_address(
            wallet.address().as_str(),
            AddressFormat::Checksummed
        ));
    }

    #[test]
    fn from_private_key_restores_same_wallet() {
        let w1 = Wallet::create().unwrap();
        let w2 = Wallet::from_private_key(&w1.keys().private.0).unwrap();
        let w3 = Wallet::from_private_key_hex(&hex::encode(w1.keys().private.0)).unwrap();
        assert_eq!(w1.address(), w2.address());
        assert_eq!(w1.public_key(), w3.public_key());
    }

    #[test]
    fn from_private_key_invalid_length() {
        assert!(Wallet::from_private_key(&[0u8; 16]).is_err());
        assert!(Wallet::from_private_key(&[0u8; 64]).is_err());
    }

    #[test]
    fn scenario_wallet_signs_verifiable_transfer() {
        let wallet = Wallet::create().unwrap().with_address(WalletAddress::new("0xA"));
        let signed = wallet
            .create_asset_transaction(&genesis(), &TransferRequest::new("0xB", "10.50", "0.01"))
            .unwrap();
        let tx = &signed.transaction;
        assert_eq!(tx.from().as_str(), "0xA");
        assert_eq!(tx.tx_type(), "asset.transfer");
        assert_eq!(tx.amount().as_str(), "10.50");
        assert_eq!(tx.signatures()[0].kid, wallet.public_key().to_hex());
        assert_eq!(tx.signatures()[0].alg, "ecdsa-secp256k1");
        assert_eq!(verify_with_genesis(tx, &genesis()), Ok(signed.tx_hash));
    }

    #[test]
    fn checksummed_wallet_rejects_opaque_recipient() {
        let wallet = Wallet::create()
            .unwrap()
            .with_address_format(AddressFormat::Checksummed);
        let err = wallet
            .create_asset_transaction(&genesis(), &TransferRequest::new("0xB", "1.0", "0.1"))
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::Transaction(TransactionError::InvalidRecipient(_))
        ));

        let other = Wallet::create().unwrap();
        let ok = wallet.create_asset_transaction(
            &genesis(),
            &TransferRequest::new(other.address().as_str(), "1.0", "0.1"),
        );
        assert!(ok.is_ok());
    }

    #[test]
    fn submit_without_node_fails() {
        let wallet = Wallet::create().unwrap();
        let signed = wallet
            .create_asset_transaction(&genesis(), &TransferRequest::new("0xB", "1.0", "0.1"))
            .unwrap();
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let err = rt.block_on(wallet.submit(&signed.transaction, "session")).unwrap_err();
        assert!(matches!(err, WalletError::NoNodeConnection));
    }

    #[test]
    fn configure_sets_format_and_client() {
        let mut wallet = Wallet::create().unwrap();
        assert!(wallet.node_client().is_none());
        let config = WalletConfig {
            node_url: "http://127.0.0.1:9/api".into(),
            address_format: AddressFormat::Checksummed,
            ..WalletConfig::default()
        };
        wallet.configure(&config).unwrap();
        assert_eq!(wallet.address_format(), AddressFormat::Checksummed);
        assert_eq!(wallet.node_client().unwrap().node_url(), "http://127.0.0.1:9/api");
    }

    #[test]
    fn wallet_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Wallet>();
    }
}
