//! SHA-256 content digests for the attestation record format.
//!
//! Every fingerprint in the record format — document bytes, canonical intent
//! text, presence-proof content — is a SHA-256 digest rendered as 64
//! lowercase hex characters. The encoding is part of the permanent record
//! contract: a record signed today must verify byte-for-byte against digests
//! recomputed years from now, so both the algorithm and the text rendering
//! are frozen.

use sha2::{Digest, Sha256};

/// Size of a SHA-256 digest in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Length of a hex-encoded digest string.
pub const DIGEST_HEX_LEN: usize = 64;

/// Computes the SHA-256 digest of arbitrary bytes as lowercase hex.
///
/// Total over all inputs including the empty slice; identical input always
/// produces the identical output string.
#[must_use]
pub fn digest_bytes(content: &[u8]) -> String {
    hex::encode(Sha256::digest(content))
}

/// Computes the SHA-256 digest of a UTF-8 string as lowercase hex.
///
/// Thin wrapper over [`digest_bytes`] on the string's UTF-8 bytes.
#[must_use]
pub fn digest_text(text: &str) -> String {
    digest_bytes(text.as_bytes())
}

/// Returns `true` if `candidate` has the exact shape of an encoded digest:
/// 64 characters, all lowercase hex.
///
/// Shape validation only — this says nothing about whether the digest
/// matches any particular content.
#[must_use]
pub fn is_valid_digest(candidate: &str) -> bool {
    candidate.len() == DIGEST_HEX_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
