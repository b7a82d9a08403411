//! The attestation record: the signed artifact.
//!
//! An [`AttestationRecord`] attests that a specific actor approved a
//! specific document at a specific time. It is immutable once created: the
//! signable fields are validated, canonicalized where applicable, assembled
//! into the canonical payload, and signed; the signature and signing public
//! key are attached as outputs and are never themselves signed.

use thiserror::Error;
use tracing::debug;

use crate::canonical::{SCHEMA_VERSION, SignablePayload, canonicalize_intent};
use crate::crypto::{PUBLIC_KEY_SIZE, SIGNATURE_SIZE, Signer, digest_text, is_valid_digest};

/// Errors rejecting attestation record creation.
///
/// All of these are format errors: they fire before any signing work.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// A required string field is empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A digest field does not have the 64-lowercase-hex shape.
    #[error("malformed digest in field {field}")]
    MalformedDigest {
        /// Name of the offending digest field.
        field: &'static str,
    },

    /// The event time is not a positive epoch-millisecond value.
    #[error("event_time must be a positive epoch-millisecond timestamp")]
    InvalidEventTime,

    /// The intent text canonicalizes to the empty string.
    #[error("intent text is empty after canonicalization")]
    EmptyIntent,
}

/// The signable field set for record creation.
///
/// `intent_text` may arrive in any superficial formatting; creation
/// canonicalizes it and derives `intent_digest` internally. Everything else
/// is carried into the record as supplied.
#[derive(Debug, Clone)]
pub struct RecordFields {
    /// 64-hex SHA-256 digest of the document bytes.
    pub document_digest: String,
    /// Approval intent text as entered.
    pub intent_text: String,
    /// Opaque system-asserted approver reference.
    pub approver_ref: String,
    /// Approver display name.
    pub approver_label: String,
    /// Signing moment, epoch milliseconds.
    pub event_time: u64,
    /// Opaque reference to the presence-proof record.
    pub presence_ref: String,
    /// Digest of the presence-proof content at signing time.
    pub presence_digest: String,
    /// Disclosure flag for assisted approval.
    pub assisted_flag: bool,
}

/// A signed approval attestation. Immutable once created.
///
/// `signature_bytes` and `signing_public_key` are derived during creation
/// and are never part of the signed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttestationRecord {
    /// Wire format version literal.
    pub schema_version: String,
    /// 64-hex SHA-256 digest of the document bytes.
    pub document_digest: String,
    /// 64-hex SHA-256 digest of the canonical intent text.
    pub intent_digest: String,
    /// Canonical intent text, kept for human display; the digest is
    /// authoritative for integrity.
    pub intent_text: String,
    /// Opaque system-asserted approver reference.
    pub approver_ref: String,
    /// Approver display name.
    pub approver_label: String,
    /// Signing moment, epoch milliseconds.
    pub event_time: u64,
    /// Opaque reference to the presence-proof record.
    pub presence_ref: String,
    /// Digest binding the presence-proof content at signing time.
    pub presence_digest: String,
    /// Disclosure flag for assisted approval.
    pub assisted_flag: bool,
    /// Ed25519 signature over the canonical payload (64 bytes).
    pub signature_bytes: Vec<u8>,
    /// Public counterpart of the signing key (32 bytes), carried for
    /// self-contained verification.
    pub signing_public_key: Vec<u8>,
}

impl AttestationRecord {
    /// Creates and signs an attestation record.
    ///
    /// Validates the field set, canonicalizes the intent text, derives the
    /// intent digest, builds the canonical payload, and signs it with the
    /// supplied key. The key is an explicit parameter — the core holds no
    /// ambient signing state.
    ///
    /// # Errors
    ///
    /// Returns a [`RecordError`] for malformed or missing fields. No signing
    /// work happens on the error path.
    pub fn create(fields: RecordFields, signer: &Signer) -> Result<Self, RecordError> {
        if !is_valid_digest(&fields.document_digest) {
            return Err(RecordError::MalformedDigest {
                field: "document_digest",
            });
        }
        if !is_valid_digest(&fields.presence_digest) {
            return Err(RecordError::MalformedDigest {
                field: "presence_digest",
            });
        }
        if fields.approver_ref.is_empty() {
            return Err(RecordError::MissingField {
                field: "approver_ref",
            });
        }
        if fields.approver_label.is_empty() {
            return Err(RecordError::MissingField {
                field: "approver_label",
            });
        }
        if fields.presence_ref.is_empty() {
            return Err(RecordError::MissingField {
                field: "presence_ref",
            });
        }
        if fields.event_time == 0 {
            return Err(RecordError::InvalidEventTime);
        }

        let intent_text = canonicalize_intent(&fields.intent_text);
        if intent_text.is_empty() {
            return Err(RecordError::EmptyIntent);
        }
        let intent_digest = digest_text(&intent_text);

        let payload = SignablePayload {
            version: SCHEMA_VERSION,
            document_digest: &fields.document_digest,
            intent_digest: &intent_digest,
            intent_text: &intent_text,
            approver_ref: &fields.approver_ref,
            approver_label: &fields.approver_label,
            event_time: fields.event_time,
            presence_ref: &fields.presence_ref,
            presence_digest: &fields.presence_digest,
            assisted_flag: fields.assisted_flag,
        };
        let signature = signer.sign(&payload.to_bytes());

        debug!(
            document_digest = %fields.document_digest,
            intent_digest = %intent_digest,
            event_time = fields.event_time,
            "attestation record signed"
        );

        Ok(Self {
            schema_version: SCHEMA_VERSION.to_string(),
            document_digest: fields.document_digest,
            intent_digest,
            intent_text,
            approver_ref: fields.approver_ref,
            approver_label: fields.approver_label,
            event_time: fields.event_time,
            presence_ref: fields.presence_ref,
            presence_digest: fields.presence_digest,
            assisted_flag: fields.assisted_flag,
            signature_bytes: signature.to_bytes().to_vec(),
            signing_public_key: signer.verifying_key().to_bytes().to_vec(),
        })
    }

    /// Rebuilds the signable payload from this record's own fields.
    ///
    /// Verification reconstructs the payload from here — never from an
    /// externally supplied copy.
    #[must_use]
    pub fn signable_payload(&self) -> SignablePayload<'_> {
        SignablePayload {
            version: &self.schema_version,
            document_digest: &self.document_digest,
            intent_digest: &self.intent_digest,
            intent_text: &self.intent_text,
            approver_ref: &self.approver_ref,
            approver_label: &self.approver_label,
            event_time: self.event_time,
            presence_ref: &self.presence_ref,
            presence_digest: &self.presence_digest,
            assisted_flag: self.assisted_flag,
        }
    }

    /// Shape check on the signature and public key fields.
    ///
    /// Records built by [`Self::create`] always pass; deserialized records
    /// may not.
    #[must_use]
    pub fn has_wellformed_key_material(&self) -> bool {
        self.signature_bytes.len() == SIGNATURE_SIZE
            && self.signing_public_key.len() == PUBLIC_KEY_SIZE
    }
}
