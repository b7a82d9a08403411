//! Independent verification of attestation records.
//!
//! Verification recomputes the whole creation pipeline from scratch —
//! document digest, payload reconstruction, signature check — using only the
//! supplied document bytes and the record's own fields, then compares. No
//! trust in the issuing service is required.
//!
//! # Check Order
//!
//! The order is fixed and load-bearing:
//!
//! 1. **Format** — field shape, before any hashing or crypto work (cheap
//!    rejection, "cannot evaluate" rather than "evaluated false")
//! 2. **Document integrity** — recomputed digest against the recorded one,
//!    before the signature check, because a tampered document is a
//!    materially different failure than a bad signature and callers must be
//!    able to distinguish them
//! 3. **Payload reconstruction** — from the record's own fields, never from
//!    an externally supplied copy
//! 4. **Signature** — strict Ed25519 verification over the reconstructed
//!    payload with the record's embedded public key
//!
//! # Failure Is a Value
//!
//! Cryptographic failure is an expected, common, testable outcome, so the
//! verifier never raises for it: every path returns a
//! [`VerificationOutcome`]. Authenticity failures deliberately carry no
//! cause breakdown (wrong key vs. tampered payload vs. forgery) — an
//! attacker probing the verifier learns nothing beyond pass/fail.

use serde::Serialize;
use subtle::ConstantTimeEq as _;
use tracing::debug;

use crate::canonical::SCHEMA_VERSION;
use crate::crypto::{digest_bytes, is_valid_digest, parse_signature, parse_verifying_key,
    verify_signature};
use crate::record::{AttestationRecord, PresenceRecord, deserialize_record};

/// What verification established about the document bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentIntegrity {
    /// The supplied bytes match the recorded digest and the signature holds.
    Intact,
    /// The supplied bytes do not match the recorded digest.
    Altered,
    /// Integrity could not be evaluated (format or authenticity failure).
    Unknown,
}

/// A verification failure with its machine-readable reason code.
///
/// Serialized with a `code` tag (`invalid_signature_format`,
/// `document_altered`, `signature_not_authentic`, `presence_not_bound`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum VerificationFailure {
    /// The record is structurally invalid; nothing was evaluated.
    InvalidSignatureFormat {
        /// What was malformed.
        detail: String,
    },

    /// The document bytes do not match the recorded digest.
    ///
    /// Carries both digests so an auditor can see what mismatched.
    DocumentAltered {
        /// Digest computed from the supplied bytes.
        computed: String,
        /// Digest the record claims.
        expected: String,
    },

    /// Cryptographic verification failed. No cause breakdown, by design.
    SignatureNotAuthentic,

    /// The supplied presence record is not the one bound into the
    /// attestation, or its acknowledgments do not hold.
    ///
    /// Only produced by [`verify_with_presence`]; the base pipeline never
    /// emits it.
    PresenceNotBound {
        /// What failed to bind.
        detail: String,
    },
}

impl VerificationFailure {
    /// The machine-readable reason code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidSignatureFormat { .. } => "invalid_signature_format",
            Self::DocumentAltered { .. } => "document_altered",
            Self::SignatureNotAuthentic => "signature_not_authentic",
            Self::PresenceNotBound { .. } => "presence_not_bound",
        }
    }
}

/// The structured result of a verification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationOutcome {
    /// Whether the record verified end to end.
    pub valid: bool,
    /// The failure, when `valid` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<VerificationFailure>,
    /// What was established about the document bytes.
    pub document_integrity: DocumentIntegrity,
    /// Approver reference, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_ref: Option<String>,
    /// Approver display label, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_label: Option<String>,
    /// Signing moment (epoch milliseconds), on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<u64>,
    /// Assisted-approval disclosure, on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assisted_flag: Option<bool>,
}

impl VerificationOutcome {
    fn success(record: &AttestationRecord) -> Self {
        Self {
            valid: true,
            failure: None,
            document_integrity: DocumentIntegrity::Intact,
            approver_ref: Some(record.approver_ref.clone()),
            approver_label: Some(record.approver_label.clone()),
            event_time: Some(record.event_time),
            assisted_flag: Some(record.assisted_flag),
        }
    }

    fn failure(failure: VerificationFailure, integrity: DocumentIntegrity) -> Self {
        Self {
            valid: false,
            failure: Some(failure),
            document_integrity: integrity,
            approver_ref: None,
            approver_label: None,
            event_time: None,
            assisted_flag: None,
        }
    }

    /// The machine-readable reason code, when verification failed.
    #[must_use]
    pub fn reason_code(&self) -> Option<&'static str> {
        self.failure.as_ref().map(VerificationFailure::code)
    }
}

/// Shape check on every required record field. Runs before any hashing or
/// cryptographic work.
fn check_format(record: &AttestationRecord) -> Result<(), String> {
    if record.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "unsupported schema_version {:?}",
            record.schema_version
        ));
    }
    for (field, value) in [
        ("document_digest", &record.document_digest),
        ("intent_digest", &record.intent_digest),
        ("presence_digest", &record.presence_digest),
    ] {
        if !is_valid_digest(value) {
            return Err(format!("field {field} is not a 64-char lowercase hex digest"));
        }
    }
    for (field, value) in [
        ("intent_text", &record.intent_text),
        ("approver_ref", &record.approver_ref),
        ("approver_label", &record.approver_label),
        ("presence_ref", &record.presence_ref),
    ] {
        if value.is_empty() {
            return Err(format!("field {field} is empty"));
        }
    }
    if record.event_time == 0 {
        return Err("event_time is not a positive timestamp".to_string());
    }
    if !record.has_wellformed_key_material() {
        return Err("signature or public key has the wrong length".to_string());
    }
    Ok(())
}

/// Verifies a record against the raw document bytes.
///
/// Pure and stateless; safe to call concurrently. Never returns an error —
/// every failure mode is a [`VerificationOutcome`].
#[must_use]
pub fn verify_document(document_bytes: &[u8], record: &AttestationRecord) -> VerificationOutcome {
    // 1. Format.
    if let Err(detail) = check_format(record) {
        debug!(reason = %detail, "verification rejected on format");
        return VerificationOutcome::failure(
            VerificationFailure::InvalidSignatureFormat { detail },
            DocumentIntegrity::Unknown,
        );
    }

    // 2. Document integrity.
    let computed = digest_bytes(document_bytes);
    if computed.as_bytes().ct_eq(record.document_digest.as_bytes()).unwrap_u8() == 0 {
        debug!(%computed, expected = %record.document_digest, "document digest mismatch");
        return VerificationOutcome::failure(
            VerificationFailure::DocumentAltered {
                computed,
                expected: record.document_digest.clone(),
            },
            DocumentIntegrity::Altered,
        );
    }

    // 3. Payload reconstruction from the record's own fields.
    let payload = record.signable_payload().to_bytes();

    // 4. Signature. Any parse or verify failure collapses to the same
    //    undifferentiated outcome.
    let authentic = parse_verifying_key(&record.signing_public_key)
        .and_then(|key| {
            let signature = parse_signature(&record.signature_bytes)?;
            verify_signature(&key, &payload, &signature)
        })
        .is_ok();
    if !authentic {
        debug!("signature check failed");
        return VerificationOutcome::failure(
            VerificationFailure::SignatureNotAuthentic,
            DocumentIntegrity::Unknown,
        );
    }

    VerificationOutcome::success(record)
}

/// Verifies a record supplied in its wire encoding.
///
/// Decode failures are format failures: the outcome carries
/// `invalid_signature_format` with the decode detail, integrity unknown.
#[must_use]
pub fn verify_document_json(document_bytes: &[u8], wire: &str) -> VerificationOutcome {
    match deserialize_record(wire) {
        Ok(record) => verify_document(document_bytes, &record),
        Err(err) => {
            debug!(reason = %err, "verification rejected on wire decode");
            VerificationOutcome::failure(
                VerificationFailure::InvalidSignatureFormat {
                    detail: err.to_string(),
                },
                DocumentIntegrity::Unknown,
            )
        },
    }
}

/// Verifies a record and additionally re-validates the bound presence proof.
///
/// Optional strengthening over [`verify_document`]: it only applies when the
/// caller holds the full presence record. Checks that the supplied record is
/// the one bound at signing time (id and content digest) and that its
/// acknowledgments still hold.
#[must_use]
pub fn verify_with_presence(
    document_bytes: &[u8],
    record: &AttestationRecord,
    presence: &PresenceRecord,
) -> VerificationOutcome {
    let outcome = verify_document(document_bytes, record);
    if !outcome.valid {
        return outcome;
    }

    if presence.id != record.presence_ref {
        return VerificationOutcome::failure(
            VerificationFailure::PresenceNotBound {
                detail: "presence record id does not match presence_ref".to_string(),
            },
            DocumentIntegrity::Intact,
        );
    }
    let presence_digest = presence.digest();
    if presence_digest
        .as_bytes()
        .ct_eq(record.presence_digest.as_bytes())
        .unwrap_u8()
        == 0
    {
        return VerificationOutcome::failure(
            VerificationFailure::PresenceNotBound {
                detail: "presence record content does not match presence_digest".to_string(),
            },
            DocumentIntegrity::Intact,
        );
    }
    if let Err(err) = presence.validate_acknowledgments() {
        return VerificationOutcome::failure(
            VerificationFailure::PresenceNotBound {
                detail: err.to_string(),
            },
            DocumentIntegrity::Intact,
        );
    }

    outcome
}
