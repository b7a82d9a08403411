//! Countersign core: canonical approval-attestation protocol.
//!
//! This crate attests that a specific actor approved a specific document at
//! a specific time, in a way a third party can verify without trusting the
//! issuing service. The hard core is the canonical signature protocol: a
//! deterministic signable payload built from structured approval data, an
//! Ed25519 signature over it, and an independent verification pipeline that
//! detects any alteration of document or metadata.
//!
//! # Pipeline
//!
//! ```text
//! creation:      raw bytes ──► digest ──► payload ──► signature
//! verification:  raw bytes ──► digest ──► payload ──► signature check
//!                      (recomputed independently, then compared)
//! ```
//!
//! # Modules
//!
//! - [`crypto`]: SHA-256 digests and Ed25519 signing — the frozen algorithms
//!   of schema version "1.0"
//! - [`canonical`]: intent-text canonicalization and the deterministic
//!   signable payload with its frozen key order
//! - [`record`]: the attestation record, presence-proof evidence, and the
//!   compact wire codec
//! - [`verify`]: the ordered verification pipeline; failure is a structured
//!   return value, never a raised error
//! - [`session`]: the approval session state machine gating signature
//!   creation
//!
//! Every cryptographic operation is pure, synchronous, and free of shared
//! state — safe to call concurrently with no coordination. The approval
//! session is the one mutable record, and its transitions demand exclusive
//! access.
//!
//! # Example
//!
//! ```rust
//! use countersign_core::{
//!     AttestationRecord, PresenceInput, PresenceRecord, RecordFields, Signer,
//!     deserialize_record, hash_document, hash_intent, serialize_record, verify_document,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let document = b"the document bytes";
//! let (intent_text, _intent_digest) = hash_intent("Approve   the contract\r\n");
//!
//! let presence = PresenceRecord::create(PresenceInput {
//!     session_id: "session-1".into(),
//!     challenge_completed: true,
//!     challenge_completed_at: 1_700_000_000_000,
//!     ack_document_reviewed: true,
//!     ack_intent_understood: true,
//!     ack_approval_binding: true,
//!     acknowledged_at: 1_700_000_000_500,
//! })?;
//!
//! let signer = Signer::generate();
//! let record = AttestationRecord::create(
//!     RecordFields {
//!         document_digest: hash_document(document),
//!         intent_text,
//!         approver_ref: "user-42".into(),
//!         approver_label: "Dana Example".into(),
//!         event_time: 1_700_000_001_000,
//!         presence_ref: presence.id.clone(),
//!         presence_digest: presence.digest(),
//!         assisted_flag: false,
//!     },
//!     &signer,
//! )?;
//!
//! let wire = serialize_record(&record);
//! let restored = deserialize_record(&wire)?;
//! assert!(verify_document(document, &restored).valid);
//! # Ok(())
//! # }
//! ```

pub mod canonical;
pub mod crypto;
pub mod record;
pub mod session;
pub mod verify;

pub use canonical::{SCHEMA_VERSION, SignablePayload, canonicalize_intent};
pub use crypto::{
    DIGEST_HEX_LEN, PUBLIC_KEY_SIZE, SIGNATURE_SIZE, Signer, SignerError, digest_bytes,
    is_valid_digest,
};
pub use record::{
    AttestationRecord, CodecError, PresenceError, PresenceInput, PresenceRecord, RecordError,
    RecordFields, deserialize_record, serialize_record,
};
pub use session::{ApprovalSession, SessionError, SessionParams, SessionStatus};
pub use verify::{
    DocumentIntegrity, VerificationFailure, VerificationOutcome, verify_document,
    verify_document_json, verify_with_presence,
};

/// Digests raw document bytes: 64-char lowercase hex SHA-256.
#[must_use]
pub fn hash_document(bytes: &[u8]) -> String {
    crypto::digest_bytes(bytes)
}

/// Canonicalizes intent text and digests the canonical form.
///
/// Returns `(canonical_text, digest)`; the digest is authoritative for
/// integrity, the text is kept for human display.
#[must_use]
pub fn hash_intent(text: &str) -> (String, String) {
    let canonical = canonical::canonicalize_intent(text);
    let digest = crypto::digest_text(&canonical);
    (canonical, digest)
}

/// Digests a presence record's canonical serialization.
///
/// This is the value bound into the attestation record as
/// `presence_digest`.
#[must_use]
pub fn hash_presence(record: &PresenceRecord) -> String {
    record.digest()
}

/// Creates and signs an attestation record.
///
/// Free-function form of [`AttestationRecord::create`]; the signing key is
/// an explicit parameter, never ambient state.
///
/// # Errors
///
/// Returns a [`RecordError`] for malformed or missing fields.
pub fn create_record(fields: RecordFields, signer: &Signer) -> Result<AttestationRecord, RecordError> {
    AttestationRecord::create(fields, signer)
}

/// Current wall-clock time as epoch milliseconds.
///
/// A convenience for callers at the edge; core operations never consult the
/// clock — they take explicit timestamps.
#[must_use]
#[allow(clippy::cast_sign_loss)] // timestamp_millis is non-negative for any realistic clock
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}
