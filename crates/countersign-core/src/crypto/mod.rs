//! Cryptographic primitives for the attestation core.
//!
//! This module provides the two fixed algorithms of the record format:
//!
//! - **SHA-256 hashing**: content fingerprints for document bytes, canonical
//!   intent text, and presence-proof records, always rendered as 64 lowercase
//!   hex characters
//! - **Ed25519 signatures**: deterministic signatures over the canonical
//!   payload, with the public key carried inside the record for
//!   self-contained verification
//!
//! Both choices are frozen for schema version "1.0". A permanent-record
//! format cannot rotate algorithms in place; a future algorithm change is a
//! new schema version.
//!
//! # Example
//!
//! ```rust
//! use countersign_core::crypto::{Signer, digest_bytes, verify_signature};
//!
//! let digest = digest_bytes(b"document bytes");
//! assert_eq!(digest.len(), 64);
//!
//! let signer = Signer::generate();
//! let signature = signer.sign(digest.as_bytes());
//! assert!(verify_signature(&signer.verifying_key(), digest.as_bytes(), &signature).is_ok());
//! ```

mod hash;
mod sign;

pub use hash::{DIGEST_HEX_LEN, DIGEST_SIZE, digest_bytes, digest_text, is_valid_digest};
pub use sign::{
    PRIVATE_KEY_SIZE, PUBLIC_KEY_SIZE, SIGNATURE_SIZE, Signature, Signer, SignerError,
    VerifyingKey, parse_signature, parse_verifying_key, verify_signature,
};
