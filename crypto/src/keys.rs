//! secp256k1 key generation.

use k256::ecdsa::{SigningKey, VerifyingKey};
use stels_types::{KeyPair, PrivateKey, PublicKey};

use crate::error::CryptoError;

/// Generate a new secp256k1 key pair from the OS random source.
///
/// Candidate scalars outside the curve order are discarded and redrawn.
pub fn generate_keypair() -> Result<KeyPair, CryptoError> {
    loop {
        let mut private = PrivateKey([0u8; 32]);
        getrandom::getrandom(&mut private.0).map_err(|e| CryptoError::Rng(e.to_string()))?;
        match keypair_from_private(private) {
            Ok(kp) => return Ok(kp),
            Err(CryptoError::InvalidPrivateKey) => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Derive the compressed public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> Result<PublicKey, CryptoError> {
    let signing_key = signing_key(private)?;
    Ok(encode_public(signing_key.verifying_key()))
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> Result<KeyPair, CryptoError> {
    let public = public_from_private(&private)?;
    Ok(KeyPair { public, private })
}

pub(crate) fn signing_key(private: &PrivateKey) -> Result<SigningKey, CryptoError> {
    SigningKey::from_slice(&private.0).map_err(|_| CryptoError::InvalidPrivateKey)
}

pub(crate) fn verifying_key(public: &PublicKey) -> Result<VerifyingKey, CryptoError> {
    VerifyingKey::from_sec1_bytes(public.as_bytes())
        .map_err(|_| CryptoError::InvalidPublicKey("not a point on secp256k1".into()))
}

fn encode_public(key: &VerifyingKey) -> PublicKey {
    let point = key.to_encoded_point(true);
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(point.as_bytes());
    PublicKey(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_produces_valid_keypair() {
        let kp = generate_keypair().unwrap();
        assert!(kp.public.0[0] == 0x02 || kp.public.0[0] == 0x03);
        assert_ne!(kp.private.0, [0u8; 32]);
    }

    #[test]
    fn public_from_private_is_deterministic() {
        let kp = generate_keypair().unwrap();
        let pub2 = public_from_private(&kp.private).unwrap();
        assert_eq!(kp.public, pub2);
    }

    #[test]
    fn known_generator_point() {
        // Private key 1 maps to the curve generator G.
        let mut one = [0u8; 32];
        one[31] = 1;
        let public = public_from_private(&PrivateKey(one)).unwrap();
        assert_eq!(
            public.to_hex(),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn zero_scalar_rejected() {
        assert_eq!(
            keypair_from_private(PrivateKey([0u8; 32])).err(),
            Some(CryptoError::InvalidPrivateKey)
        );
    }

    #[test]
    fn scalar_above_order_rejected() {
        assert!(public_from_private(&PrivateKey([0xFF; 32])).is_err());
    }

    #[test]
    fn invalid_public_key_rejected() {
        assert!(verifying_key(&PublicKey([0x05; 33])).is_err());
    }
}
