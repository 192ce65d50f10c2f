//! Build → canonicalize → hash → sign → assemble.

use stels_crypto::AddressFormat;
use stels_types::{Timestamp, TokenGenesisDocument, TxHash, WalletAddress};
use tracing::debug;

use crate::asset::{AssetTransaction, AssetTransactionBase, ASSET_TRANSFER};
use crate::error::TransactionError;
use crate::signer::TransactionSigner;
use crate::validation::{validate_transfer, ValidatedTransfer};

/// Caller-supplied parameters of a transfer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferRequest {
    pub to: String,
    pub amount: String,
    pub fee: String,
    pub prev_hash: Option<String>,
    pub memo: Option<String>,
}

impl TransferRequest {
    pub fn new(to: impl Into<String>, amount: impl Into<String>, fee: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            amount: amount.into(),
            fee: fee.into(),
            prev_hash: None,
            memo: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_prev_hash(mut self, prev_hash: impl Into<String>) -> Self {
        self.prev_hash = Some(prev_hash.into());
        self
    }
}

/// A freshly signed transaction together with the hash that was signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedTransfer {
    pub transaction: AssetTransaction,
    pub tx_hash: TxHash,
}

/// Assemble the unsigned base from already validated inputs.
pub fn build_base(
    from: &WalletAddress,
    genesis: &TokenGenesisDocument,
    validated: &ValidatedTransfer,
    request: &TransferRequest,
    timestamp: Timestamp,
) -> AssetTransactionBase {
    AssetTransactionBase {
        tx_type: ASSET_TRANSFER.to_string(),
        version: genesis.protocol.tx_version.clone(),
        network: genesis.network_ref(),
        token_id: genesis.token.id.clone(),
        from: from.clone(),
        to: validated.to.clone(),
        amount: validated.amount.clone(),
        fee: validated.fee.clone(),
        currency: genesis.currency_symbol().to_string(),
        timestamp,
        prev_hash: request.prev_hash.clone(),
        memo: request.memo.clone(),
    }
}

/// Build and sign an asset transfer stamped with the current time.
pub fn create_signed_transaction(
    signer: &dyn TransactionSigner,
    from: &WalletAddress,
    genesis: &TokenGenesisDocument,
    request: &TransferRequest,
    address_format: AddressFormat,
) -> Result<SignedTransfer, TransactionError> {
    create_signed_transaction_at(signer, from, genesis, request, address_format, Timestamp::now())
}

/// Build and sign an asset transfer with an explicit timestamp.
pub fn create_signed_transaction_at(
    signer: &dyn TransactionSigner,
    from: &WalletAddress,
    genesis: &TokenGenesisDocument,
    request: &TransferRequest,
    address_format: AddressFormat,
    timestamp: Timestamp,
) -> Result<SignedTransfer, TransactionError> {
    let validated = validate_transfer(
        &request.to,
        &request.amount,
        &request.fee,
        genesis,
        address_format,
    )?;

    let base = build_base(from, genesis, &validated, request, timestamp);
    let tx_hash = base.hash()?;
    debug!(
        tx_hash = %tx_hash,
        network = %base.network.id,
        to = %base.to,
        "built asset transfer"
    );

    let record = signer.signature_record(&tx_hash, &validated.sign_domain)?;
    Ok(SignedTransfer {
        transaction: AssetTransaction::assemble(base, vec![record]),
        tx_hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verify::verify_transaction;
    use std::cell::Cell;

    const GENESIS: &str = r#"{
        "network": {"id": "testnet", "name": "Testnet", "chain_id": 1},
        "protocol": {"tx_version": "1.0", "sign_domains": {"token": ["stels", "testnet", "token"]}},
        "token": {"id": "tok1"},
        "parameters": {"currency": {"symbol": "USDT"}}
    }"#;

    const TS: u64 = 1_700_000_000_000;

    fn genesis() -> TokenGenesisDocument {
        TokenGenesisDocument::from_json(GENESIS).unwrap()
    }

    /// Stands in for the opaque `PKa`/`SKa` wallet of the dashboard scenario.
    struct OpaqueSigner {
        calls: Cell<usize>,
    }

    impl TransactionSigner for OpaqueSigner {
        fn kid(&self) -> String {
            "PKa".into()
        }

        fn sign_hash(&self, hash: &TxHash, domain: &[String]) -> Result<String, TransactionError> {
            self.calls.set(self.calls.get() + 1);
            Ok(format!("SKa:{}:{}", domain.join("/"), hash))
        }
    }

    fn opaque() -> OpaqueSigner {
        OpaqueSigner { calls: Cell::new(0) }
    }

    #[test]
    fn end_to_end_scenario() {
        let signer = opaque();
        let signed = create_signed_transaction_at(
            &signer,
            &WalletAddress::new("0xA"),
            &genesis(),
            &TransferRequest::new("0xB", "10.50", "0.01"),
            AddressFormat::Basic,
            Timestamp::from_millis(TS),
        )
        .unwrap();

        let tx = &signed.transaction;
        assert_eq!(tx.tx_type(), "asset.transfer");
        assert_eq!(tx.amount().as_str(), "10.50");
        assert_eq!(tx.fee().as_str(), "0.01");
        assert_eq!(tx.base().currency, "USDT");
        assert_eq!(tx.base().token_id, "tok1");
        assert_eq!(tx.base().version, "1.0");
        assert_eq!(tx.prev_hash(), None);
        assert_eq!(tx.signatures().len(), 1);
        assert_eq!(tx.signatures()[0].kid, "PKa");
        assert_eq!(tx.signatures()[0].alg, "ecdsa-secp256k1");
        assert!(tx.signatures()[0].sig.starts_with("SKa:stels/testnet/token:"));

        assert_eq!(
            tx.base().canonical().unwrap(),
            r#"{"amount":"10.50","currency":"USDT","fee":"0.01","from":"0xA","network":{"chain_id":1,"id":"testnet"},"prev_hash":null,"timestamp":1700000000000,"to":"0xB","token_id":"tok1","type":"asset.transfer","version":"1.0"}"#
        );

        // Independent re-derivation from the wire form.
        let reparsed = AssetTransaction::from_json(&tx.to_json().unwrap()).unwrap();
        let rederived = stels_crypto::hash_canonical(&reparsed.base().canonical().unwrap());
        assert_eq!(rederived, signed.tx_hash);
        assert_eq!(tx.tx_hash().unwrap(), signed.tx_hash);
    }

    #[test]
    fn real_key_round_trip_verifies() {
        let kp = stels_crypto::generate_keypair().unwrap();
        let from = stels_crypto::derive_address(&kp.public);
        let signed = create_signed_transaction(
            &kp,
            &from,
            &genesis(),
            &TransferRequest::new("0xB", "1.0", "0.1"),
            AddressFormat::Basic,
        )
        .unwrap();
        let domain = vec!["stels".to_string(), "testnet".to_string(), "token".to_string()];
        assert_eq!(verify_transaction(&signed.transaction, &domain), Ok(signed.tx_hash));
        assert_eq!(signed.transaction.signatures()[0].kid, kp.public.to_hex());
    }

    #[test]
    fn invalid_input_never_reaches_signer() {
        let signer = opaque();
        let requests = [
            TransferRequest::new("", "1.0", "0.1"),
            TransferRequest::new("0xB", "1", "0.1"),
            TransferRequest::new("0xB", "1.0", "-0.1"),
        ];
        for request in &requests {
            let result = create_signed_transaction(
                &signer,
                &WalletAddress::new("0xA"),
                &genesis(),
                request,
                AddressFormat::Basic,
            );
            assert!(result.is_err());
        }
        assert_eq!(signer.calls.get(), 0);
    }

    #[test]
    fn missing_sign_domain_never_reaches_signer() {
        let signer = opaque();
        let mut g = genesis();
        g.protocol.sign_domains = None;
        let result = create_signed_transaction(
            &signer,
            &WalletAddress::new("0xA"),
            &g,
            &TransferRequest::new("0xB", "1.0", "0.1"),
            AddressFormat::Basic,
        );
        assert!(matches!(result, Err(TransactionError::InvalidSignDomain(_))));
        assert_eq!(signer.calls.get(), 0);
    }

    #[test]
    fn memo_absent_differs_from_empty_memo() {
        let signer = opaque();
        let build = |request: TransferRequest| {
            create_signed_transaction_at(
                &signer,
                &WalletAddress::new("0xA"),
                &genesis(),
                &request,
                AddressFormat::Basic,
                Timestamp::from_millis(TS),
            )
            .unwrap()
        };
        let without = build(TransferRequest::new("0xB", "1.0", "0.1"));
        let empty = build(TransferRequest::new("0xB", "1.0", "0.1").with_memo(""));

        let c_without = without.transaction.base().canonical().unwrap();
        let c_empty = empty.transaction.base().canonical().unwrap();
        assert!(!c_without.contains("\"memo\""));
        assert!(c_empty.contains("\"memo\":\"\""));
        assert_ne!(without.tx_hash, empty.tx_hash);
    }

    #[test]
    fn prev_hash_is_carried_through() {
        let signer = opaque();
        let prev = "cd".repeat(32);
        let signed = create_signed_transaction_at(
            &signer,
            &WalletAddress::new("0xA"),
            &genesis(),
            &TransferRequest::new("0xB", "1.0", "0.1").with_prev_hash(prev.clone()),
            AddressFormat::Basic,
            Timestamp::from_millis(TS),
        )
        .unwrap();
        assert_eq!(signed.transaction.prev_hash(), Some(prev.as_str()));
        assert!(signed
            .transaction
            .base()
            .canonical()
            .unwrap()
            .contains(&format!("\"prev_hash\":\"{prev}\"")));
    }

    #[test]
    fn trailing_zeros_change_the_hash() {
        let signer = opaque();
        let build = |amount: &str| {
            create_signed_transaction_at(
                &signer,
                &WalletAddress::new("0xA"),
                &genesis(),
                &TransferRequest::new("0xB", amount, "0.01"),
                AddressFormat::Basic,
                Timestamp::from_millis(TS),
            )
            .unwrap()
            .tx_hash
        };
        assert_ne!(build("10.50"), build("10.5"));
        assert_eq!(build("10.50"), build("10.50"));
    }

    #[test]
    fn amended_fee_is_a_new_transaction() {
        let kp = stels_crypto::generate_keypair().unwrap();
        let from = WalletAddress::new("0xA");
        let build = |fee: &str| {
            create_signed_transaction_at(
                &kp,
                &from,
                &genesis(),
                &TransferRequest::new("0xB", "1.0", fee),
                AddressFormat::Basic,
                Timestamp::from_millis(TS),
            )
            .unwrap()
        };
        let original = build("0.01");
        let amended = build("0.02");
        assert_ne!(original.tx_hash, amended.tx_hash);
        assert_ne!(
            original.transaction.signatures()[0].sig,
            amended.transaction.signatures()[0].sig
        );
    }
}
