//! Subcommand handlers. Results go to stdout as JSON; logs go to stderr.

use anyhow::{bail, Context};
use serde_json::json;
use std::path::Path;
use tracing::info;
use zeroize::Zeroizing;

use stels_transactions::{verify_with_genesis, AssetTransaction, SignedTransfer, TransferRequest};
use stels_types::{TokenGenesisDocument, WalletAddress};
use stels_utils::redact;
use stels_wallet_core::{encrypt_keystore, load_keystore, save_keystore, Wallet, WalletConfig};

use crate::{KeystoreArgs, TransferArgs};

fn read_password(var: &str) -> anyhow::Result<Zeroizing<String>> {
    let password = std::env::var(var)
        .map(Zeroizing::new)
        .with_context(|| format!("password variable {var} is not set"))?;
    if password.is_empty() {
        bail!("password variable {var} is empty");
    }
    Ok(password)
}

fn read_genesis(path: &Path) -> anyhow::Result<TokenGenesisDocument> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading genesis {}", path.display()))?;
    TokenGenesisDocument::from_json(&json)
        .with_context(|| format!("parsing genesis {}", path.display()))
}

fn open_wallet(key: &KeystoreArgs, config: &WalletConfig) -> anyhow::Result<Wallet> {
    let keystore = load_keystore(&key.keystore)?;
    let password = read_password(&key.password_env)?;
    let wallet = Wallet::from_keystore(&keystore, &password)
        .with_context(|| format!("opening keystore {}", key.keystore.display()))?;
    Ok(wallet.with_address_format(config.address_format))
}

fn transfer_request(args: &TransferArgs) -> TransferRequest {
    let mut request = TransferRequest::new(&args.to, &args.amount, &args.fee);
    if let Some(memo) = &args.memo {
        request = request.with_memo(memo);
    }
    if let Some(prev_hash) = &args.prev_hash {
        request = request.with_prev_hash(prev_hash);
    }
    request
}

fn build_signed(
    wallet: &Wallet,
    transfer: &TransferArgs,
    out: Option<&Path>,
) -> anyhow::Result<SignedTransfer> {
    let genesis = read_genesis(&transfer.genesis)?;
    let signed = wallet.create_asset_transaction(&genesis, &transfer_request(transfer))?;
    if let Some(path) = out {
        std::fs::write(path, signed.transaction.to_json()?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "signed transaction written");
    }
    Ok(signed)
}

pub fn keygen(
    out: &Path,
    password_env: &str,
    address: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    if out.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", out.display());
    }
    let password = read_password(password_env)?;

    let mut wallet = Wallet::create()?;
    if let Some(address) = address {
        wallet = wallet.with_address(WalletAddress::new(address));
    }
    let keystore = encrypt_keystore(wallet.keys(), wallet.address(), &password)?;
    save_keystore(&keystore, out)?;
    info!(address = %wallet.address(), path = %out.display(), "keystore created");

    println!(
        "{}",
        json!({
            "address": wallet.address().as_str(),
            "public_key": wallet.public_key().to_hex(),
            "keystore": out.display().to_string(),
        })
    );
    Ok(())
}

pub fn sign(
    config: &WalletConfig,
    key: &KeystoreArgs,
    transfer: &TransferArgs,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let wallet = open_wallet(key, config)?;
    let signed = build_signed(&wallet, transfer, out)?;
    println!(
        "{}",
        json!({
            "tx_hash": signed.tx_hash.to_hex(),
            "transaction": signed.transaction,
        })
    );
    Ok(())
}

pub fn verify(genesis: &Path, tx: &Path) -> anyhow::Result<()> {
    let genesis = read_genesis(genesis)?;
    let json =
        std::fs::read_to_string(tx).with_context(|| format!("reading {}", tx.display()))?;
    let transaction = AssetTransaction::from_json(&json)?;
    let tx_hash = verify_with_genesis(&transaction, &genesis)?;
    println!(
        "{}",
        json!({
            "valid": true,
            "tx_hash": tx_hash.to_hex(),
            "signatures": transaction.signatures().len(),
        })
    );
    Ok(())
}

pub async fn submit(
    config: &WalletConfig,
    key: &KeystoreArgs,
    transfer: &TransferArgs,
    session: &str,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let mut wallet = open_wallet(key, config)?;
    wallet.configure(config)?;
    let signed = build_signed(&wallet, transfer, out)?;

    info!(
        node = %config.node_url,
        tx_hash = %signed.tx_hash,
        session = %redact(session),
        "submitting transfer"
    );
    let result = wallet
        .submit(&signed.transaction, session)
        .await
        .with_context(|| format!("submitting transaction {}", signed.tx_hash))?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const GENESIS: &str = r#"{
        "network": {"id": "testnet", "chain_id": 1},
        "protocol": {"tx_version": "1.0", "sign_domains": {"token": ["stels", "testnet", "token"]}},
        "token": {"id": "tok1"},
        "parameters": {"currency": {"symbol": "USDT"}}
    }"#;

    fn args(genesis: PathBuf) -> TransferArgs {
        TransferArgs {
            genesis,
            to: "0xB".into(),
            amount: "10.50".into(),
            fee: "0.01".into(),
            memo: None,
            prev_hash: None,
        }
    }

    #[test]
    fn request_keeps_empty_memo() {
        let mut a = args(PathBuf::from("g.json"));
        a.memo = Some(String::new());
        a.prev_hash = Some("ab".into());
        let request = transfer_request(&a);
        assert_eq!(request.memo.as_deref(), Some(""));
        assert_eq!(request.prev_hash.as_deref(), Some("ab"));
    }

    #[test]
    fn signed_file_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let genesis = dir.path().join("genesis.json");
        let tx = dir.path().join("tx.json");
        std::fs::write(&genesis, GENESIS).unwrap();

        let wallet = Wallet::create().unwrap();
        let signed = build_signed(&wallet, &args(genesis.clone()), Some(tx.as_path())).unwrap();

        let written = AssetTransaction::from_json(&std::fs::read_to_string(&tx).unwrap()).unwrap();
        assert_eq!(written, signed.transaction);
        assert!(verify(&genesis, &tx).is_ok());
    }

    #[test]
    fn keygen_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("key.json");
        std::fs::write(&out, "{}").unwrap();
        let err = keygen(&out, "STELS_CLI_TEST_UNUSED", None, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn missing_password_variable_is_an_error() {
        let err = read_password("STELS_CLI_TEST_DEFINITELY_UNSET").unwrap_err();
        assert!(err.to_string().contains("STELS_CLI_TEST_DEFINITELY_UNSET"));
    }
}
