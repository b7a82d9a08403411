//! Presence-proof records.
//!
//! A presence record is the evidence that a human actively confirmed the
//! approval: a completed liveness challenge plus exactly three required
//! acknowledgments, each timestamped. The record is created once at approval
//! time and never mutated afterward. It is never embedded in the attestation
//! record — only referenced by id and bound by digest, so the exact content
//! at signing time cannot be swapped later.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::digest_bytes;

/// Errors rejecting a presence record at creation time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenceError {
    /// The liveness challenge was not completed.
    #[error("presence challenge not completed")]
    ChallengeNotCompleted,

    /// A required acknowledgment is false.
    #[error("required acknowledgment not given: {field}")]
    AcknowledgmentMissing {
        /// Name of the missing acknowledgment field.
        field: &'static str,
    },

    /// A timestamp is zero or otherwise not a positive epoch-millisecond
    /// value.
    #[error("invalid timestamp in field {field}")]
    InvalidTimestamp {
        /// Name of the offending timestamp field.
        field: &'static str,
    },

    /// The owning session id is empty.
    #[error("empty session id")]
    EmptySessionId,
}

/// Evidence of active human confirmation, bound into the attestation record
/// by digest.
///
/// Field declaration order is the canonical serialization order used for
/// digest binding; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceRecord {
    /// Unique record id.
    pub id: String,
    /// Id of the owning approval session.
    pub session_id: String,
    /// Whether the liveness challenge was completed.
    pub challenge_completed: bool,
    /// When the challenge was completed, epoch milliseconds.
    pub challenge_completed_at: u64,
    /// Acknowledgment: the approver reviewed the document.
    pub ack_document_reviewed: bool,
    /// Acknowledgment: the approver understood the stated intent.
    pub ack_intent_understood: bool,
    /// Acknowledgment: the approver accepts the approval as binding.
    pub ack_approval_binding: bool,
    /// When the acknowledgments were given, epoch milliseconds.
    pub acknowledged_at: u64,
}

/// Caller-supplied inputs for creating a presence record.
#[derive(Debug, Clone)]
pub struct PresenceInput {
    /// Id of the owning approval session.
    pub session_id: String,
    /// Whether the liveness challenge was completed.
    pub challenge_completed: bool,
    /// When the challenge was completed, epoch milliseconds.
    pub challenge_completed_at: u64,
    /// Acknowledgment: document reviewed.
    pub ack_document_reviewed: bool,
    /// Acknowledgment: intent understood.
    pub ack_intent_understood: bool,
    /// Acknowledgment: approval accepted as binding.
    pub ack_approval_binding: bool,
    /// When the acknowledgments were given, epoch milliseconds.
    pub acknowledged_at: u64,
}

impl PresenceRecord {
    /// Creates a presence record, assigning a fresh id.
    ///
    /// Fail-closed: the challenge must be completed and all three
    /// acknowledgments must be true, with positive timestamps.
    ///
    /// # Errors
    ///
    /// Returns a [`PresenceError`] naming the first failed requirement.
    pub fn create(input: PresenceInput) -> Result<Self, PresenceError> {
        if input.session_id.is_empty() {
            return Err(PresenceError::EmptySessionId);
        }
        if !input.challenge_completed {
            return Err(PresenceError::ChallengeNotCompleted);
        }
        if !input.ack_document_reviewed {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_document_reviewed",
            });
        }
        if !input.ack_intent_understood {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_intent_understood",
            });
        }
        if !input.ack_approval_binding {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_approval_binding",
            });
        }
        if input.challenge_completed_at == 0 {
            return Err(PresenceError::InvalidTimestamp {
                field: "challenge_completed_at",
            });
        }
        if input.acknowledged_at == 0 {
            return Err(PresenceError::InvalidTimestamp {
                field: "acknowledged_at",
            });
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            session_id: input.session_id,
            challenge_completed: input.challenge_completed,
            challenge_completed_at: input.challenge_completed_at,
            ack_document_reviewed: input.ack_document_reviewed,
            ack_intent_understood: input.ack_intent_understood,
            ack_approval_binding: input.ack_approval_binding,
            acknowledged_at: input.acknowledged_at,
        })
    }

    /// Canonical serialization of the record content, compact JSON with
    /// fields in declaration order.
    #[must_use]
    pub fn canonical_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("presence serialization is infallible")
    }

    /// SHA-256 digest of the canonical serialization, lowercase hex.
    ///
    /// This is the value stored as `presence_digest` in the attestation
    /// record.
    #[must_use]
    pub fn digest(&self) -> String {
        digest_bytes(&self.canonical_bytes())
    }

    /// Re-checks the acknowledgment invariants on an existing record.
    ///
    /// Used by verification-time strengthening when the full record is
    /// available; creation already enforces these.
    ///
    /// # Errors
    ///
    /// Returns the first violated requirement, as [`Self::create`] would.
    pub fn validate_acknowledgments(&self) -> Result<(), PresenceError> {
        if !self.challenge_completed {
            return Err(PresenceError::ChallengeNotCompleted);
        }
        if !self.ack_document_reviewed {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_document_reviewed",
            });
        }
        if !self.ack_intent_understood {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_intent_understood",
            });
        }
        if !self.ack_approval_binding {
            return Err(PresenceError::AcknowledgmentMissing {
                field: "ack_approval_binding",
            });
        }
        Ok(())
    }
}
