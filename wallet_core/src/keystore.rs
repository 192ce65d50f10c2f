//! Argon2id encrypted keystore for secp256k1 private keys.
//!
//! A keystore file is JSON holding the wallet address and public key in the
//! clear, plus the private key sealed with AES-256-GCM under a key derived
//! from the password by Argon2id. The KDF parameters used at encryption time
//! are recorded in the file and honoured on decryption.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use stels_types::{KeyPair, PrivateKey, PublicKey, WalletAddress};
use std::path::Path;
use zeroize::Zeroizing;

use crate::error::WalletError;

const KEYSTORE_VERSION: u32 = 1;
const CIPHER: &str = "aes-256-gcm";
const KDF: &str = "argon2id";

const SALT_LEN: usize = 32;
/// AES-GCM nonce length in bytes (96 bits).
const NONCE_LEN: usize = 12;

/// Argon2id cost parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory cost in KiB.
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    /// 64 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory: 65536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreFile {
    pub version: u32,
    pub address: WalletAddress,
    pub public_key: PublicKey,
    pub crypto: KeystoreCrypto,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub cipher: String,
    pub kdf: String,
    pub kdf_params: KdfParams,
    /// Hex-encoded salt.
    pub salt: String,
    /// Hex-encoded nonce.
    pub nonce: String,
    /// Hex-encoded ciphertext (includes the GCM tag).
    pub ciphertext: String,
}

/// Seal `keys` under `password` with the default KDF cost.
pub fn encrypt_keystore(
    keys: &KeyPair,
    address: &WalletAddress,
    password: &str,
) -> Result<KeystoreFile, WalletError> {
    encrypt_keystore_with_params(keys, address, password, KdfParams::default())
}

/// Seal `keys` under `password` with explicit KDF cost.
pub fn encrypt_keystore_with_params(
    keys: &KeyPair,
    address: &WalletAddress,
    password: &str,
    kdf_params: KdfParams,
) -> Result<KeystoreFile, WalletError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    getrandom::getrandom(&mut salt)
        .and_then(|_| getrandom::getrandom(&mut nonce_bytes))
        .map_err(|e| WalletError::Keystore(format!("random source failed: {e}")))?;

    let cipher = cipher_for(password, &salt, kdf_params)?;
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), &keys.private.0[..])
        .map_err(|_| WalletError::Keystore("encryption failed".into()))?;

    Ok(KeystoreFile {
        version: KEYSTORE_VERSION,
        address: address.clone(),
        public_key: keys.public.clone(),
        crypto: KeystoreCrypto {
            cipher: CIPHER.to_string(),
            kdf: KDF.to_string(),
            kdf_params,
            salt: hex::encode(salt),
            nonce: hex::encode(nonce_bytes),
            ciphertext: hex::encode(ciphertext),
        },
    })
}

/// Open a keystore, returning its key pair.
///
/// The decrypted private key must reproduce the recorded public key.
pub fn decrypt_keystore(keystore: &KeystoreFile, password: &str) -> Result<KeyPair, WalletError> {
    if keystore.version != KEYSTORE_VERSION {
        return Err(WalletError::Keystore(format!(
            "unsupported keystore version: {}",
            keystore.version
        )));
    }
    let crypto = &keystore.crypto;
    if crypto.cipher != CIPHER || crypto.kdf != KDF {
        return Err(WalletError::Keystore(format!(
            "unsupported cipher/kdf: {}/{}",
            crypto.cipher, crypto.kdf
        )));
    }

    let salt = decode_field("salt", &crypto.salt)?;
    let nonce_bytes = decode_field("nonce", &crypto.nonce)?;
    let ciphertext = decode_field("ciphertext", &crypto.ciphertext)?;
    if nonce_bytes.len() != NONCE_LEN {
        return Err(WalletError::Keystore(format!(
            "invalid nonce length: expected {NONCE_LEN}, got {}",
            nonce_bytes.len()
        )));
    }

    let cipher = cipher_for(password, &salt, crypto.kdf_params)?;
    let plaintext = cipher
        .decrypt(Nonce::from_slice(&nonce_bytes), &ciphertext[..])
        .map(Zeroizing::new)
        .map_err(|_| {
            WalletError::Keystore("decryption failed: wrong password or corrupted data".into())
        })?;

    let mut private = PrivateKey([0u8; 32]);
    if plaintext.len() != private.0.len() {
        return Err(WalletError::Keystore(format!(
            "decrypted key has wrong length: {}",
            plaintext.len()
        )));
    }
    private.0.copy_from_slice(&plaintext);

    let keys = stels_crypto::keypair_from_private(private)
        .map_err(|e| WalletError::Key(e.to_string()))?;
    if keys.public != keystore.public_key {
        return Err(WalletError::Keystore(
            "decrypted key does not match the recorded public key".into(),
        ));
    }
    Ok(keys)
}

pub fn save_keystore(keystore: &KeystoreFile, path: &Path) -> Result<(), WalletError> {
    let json = serde_json::to_string_pretty(keystore)
        .map_err(|e| WalletError::Keystore(format!("JSON serialization failed: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| WalletError::Keystore(format!("failed to write {}: {e}", path.display())))
}

pub fn load_keystore(path: &Path) -> Result<KeystoreFile, WalletError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| WalletError::Keystore(format!("failed to read {}: {e}", path.display())))?;
    serde_json::from_str(&json)
        .map_err(|e| WalletError::Keystore(format!("invalid keystore JSON: {e}")))
}

fn cipher_for(password: &str, salt: &[u8], kdf: KdfParams) -> Result<Aes256Gcm, WalletError> {
    let params = Params::new(kdf.memory, kdf.iterations, kdf.parallelism, Some(32))
        .map_err(|e| WalletError::Keystore(format!("Argon2 params error: {e}")))?;
    let mut derived = Zeroizing::new([0u8; 32]);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(password.as_bytes(), salt, derived.as_mut_slice())
        .map_err(|e| WalletError::Keystore(format!("Argon2 hashing failed: {e}")))?;
    Aes256Gcm::new_from_slice(derived.as_slice())
        .map_err(|e| WalletError::Keystore(format!("AES key init failed: {e}")))
}

fn decode_field(name: &str, value: &str) -> Result<Vec<u8>, WalletError> {
    hex::decode(value).map_err(|e| WalletError::Keystore(format!("invalid {name} hex: {e}")))
}
