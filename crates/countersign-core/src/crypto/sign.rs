//! Ed25519 signing and verification primitives.
//!
//! Signatures here are deterministic: the same key and the same message
//! always produce the same 64-byte signature, with no nonce dependency. That
//! property is load-bearing for a permanent record format — a signature can
//! be re-derived and compared at any point in the future.
//!
//! The core never generates or stores long-lived keys. A [`Signer`] is
//! constructed from key material supplied by an external key-custody
//! collaborator; [`Signer::generate`] exists for bootstrap and testing only.

use ed25519_dalek::{Signer as _, SigningKey};
use rand::rngs::OsRng;
use thiserror::Error;

/// Size of an Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Size of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Size of an Ed25519 private key seed in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// An Ed25519 signature.
pub type Signature = ed25519_dalek::Signature;

/// An Ed25519 public (verifying) key.
pub type VerifyingKey = ed25519_dalek::VerifyingKey;

/// Errors from signature parsing and verification.
#[derive(Debug, Error)]
pub enum SignerError {
    /// Key material has the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        /// The expected number of bytes.
        expected: usize,
        /// The actual number of bytes supplied.
        actual: usize,
    },

    /// Key bytes do not decode to a valid curve point.
    #[error("invalid public key encoding")]
    InvalidPublicKey,

    /// Signature material has the wrong length.
    #[error("invalid signature length: expected {expected} bytes, got {actual}")]
    InvalidSignatureLength {
        /// The expected number of bytes.
        expected: usize,
        /// The actual number of bytes supplied.
        actual: usize,
    },

    /// Cryptographic verification failed.
    ///
    /// Deliberately undifferentiated: wrong key, tampered message, and forged
    /// signature are indistinguishable to the caller.
    #[error("signature verification failed")]
    VerificationFailed,
}

/// An Ed25519 signer over a caller-supplied private key.
pub struct Signer {
    signing_key: SigningKey,
}

impl Signer {
    /// Constructs a signer from a 32-byte private key seed.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyLength` if `seed` is not exactly
    /// [`PRIVATE_KEY_SIZE`] bytes.
    pub fn from_bytes(seed: &[u8]) -> Result<Self, SignerError> {
        let seed: &[u8; PRIVATE_KEY_SIZE] =
            seed.try_into()
                .map_err(|_| SignerError::InvalidKeyLength {
                    expected: PRIVATE_KEY_SIZE,
                    actual: seed.len(),
                })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(seed),
        })
    }

    /// Generates an ephemeral keypair.
    ///
    /// Bootstrap and testing only. Production keys come from the key-custody
    /// collaborator via [`Signer::from_bytes`].
    #[must_use]
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Signs a message, producing a deterministic 64-byte signature.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        self.signing_key.sign(message)
    }

    /// Returns the public counterpart of the signing key.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose private key material, even in debug output.
        f.debug_struct("Signer")
            .field("verifying_key", &hex::encode(self.verifying_key().as_bytes()))
            .finish_non_exhaustive()
    }
}

/// Parses a verifying key from raw bytes.
///
/// # Errors
///
/// Returns `InvalidKeyLength` for a wrong-sized slice and `InvalidPublicKey`
/// for 32 bytes that are not a valid curve point (fail-closed).
pub fn parse_verifying_key(bytes: &[u8]) -> Result<VerifyingKey, SignerError> {
    let bytes: &[u8; PUBLIC_KEY_SIZE] =
        bytes.try_into().map_err(|_| SignerError::InvalidKeyLength {
            expected: PUBLIC_KEY_SIZE,
            actual: bytes.len(),
        })?;
    VerifyingKey::from_bytes(bytes).map_err(|_| SignerError::InvalidPublicKey)
}

/// Parses a signature from raw bytes.
///
/// # Errors
///
/// Returns `InvalidSignatureLength` if `bytes` is not exactly
/// [`SIGNATURE_SIZE`] bytes.
pub fn parse_signature(bytes: &[u8]) -> Result<Signature, SignerError> {
    let bytes: &[u8; SIGNATURE_SIZE] =
        bytes
            .try_into()
            .map_err(|_| SignerError::InvalidSignatureLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            })?;
    Ok(Signature::from_bytes(bytes))
}

/// Verifies `signature` over `message` with `verifying_key`.
///
/// Uses strict verification (rejects malleable encodings).
///
/// # Errors
///
/// Returns `VerificationFailed` on any cryptographic mismatch, without
/// distinguishing the cause.
pub fn verify_signature(
    verifying_key: &VerifyingKey,
    message: &[u8],
    signature: &Signature,
) -> Result<(), SignerError> {
    verifying_key
        .verify_strict(message, signature)
        .map_err(|_| SignerError::VerificationFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trip() {
        let signer = Signer::generate();
        let message = b"payload bytes";
        let signature = signer.sign(message);
        assert!(verify_signature(&signer.verifying_key(), message, &signature).is_ok());
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = Signer::from_bytes(&[7u8; 32]).unwrap();
        let message = b"same message";
        assert_eq!(
            signer.sign(message).to_bytes(),
            signer.sign(message).to_bytes()
        );
    }

    #[test]
    fn tampered_message_fails_verification() {
        let signer = Signer::generate();
        let signature = signer.sign(b"original");
        let result = verify_signature(&signer.verifying_key(), b"tampered", &signature);
        assert!(matches!(result, Err(SignerError::VerificationFailed)));
    }

    #[test]
    fn wrong_key_fails_verification() {
        let signer = Signer::generate();
        let other = Signer::generate();
        let message = b"message";
        let signature = signer.sign(message);
        let result = verify_signature(&other.verifying_key(), message, &signature);
        assert!(matches!(result, Err(SignerError::VerificationFailed)));
    }

    #[test]
    fn from_bytes_rejects_wrong_length() {
        let err = Signer::from_bytes(&[0u8; 31]).unwrap_err();
        assert!(matches!(
            err,
            SignerError::InvalidKeyLength {
                expected: 32,
                actual: 31
            }
        ));
    }

    #[test]
    fn parse_signature_rejects_wrong_length() {
        let err = parse_signature(&[0u8; 63]).unwrap_err();
        assert!(matches!(
            err,
            SignerError::InvalidSignatureLength {
                expected: 64,
                actual: 63
            }
        ));
    }

    #[test]
    fn parse_verifying_key_round_trip() {
        let signer = Signer::generate();
        let bytes = signer.verifying_key().to_bytes();
        let parsed = parse_verifying_key(&bytes).unwrap();
        assert_eq!(parsed.as_bytes(), signer.verifying_key().as_bytes());
    }

    #[test]
    fn parse_verifying_key_rejects_wrong_length() {
        let err = parse_verifying_key(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, SignerError::InvalidKeyLength { .. }));
    }

    #[test]
    fn debug_output_hides_private_key() {
        let signer = Signer::from_bytes(&[9u8; 32]).unwrap();
        let debug = format!("{signer:?}");
        assert!(!debug.contains("090909"));
        assert!(debug.contains("verifying_key"));
    }
}
