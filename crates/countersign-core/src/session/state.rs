//! The approval session record and its transitions.

use rand::RngCore as _;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::SessionError;
use crate::canonical::canonicalize_intent;
use crate::crypto::digest_text;

/// Number of random bytes in a session access token (hex-encoded to 32
/// characters).
const ACCESS_TOKEN_BYTES: usize = 16;

/// Status of an approval session.
///
/// `Pending` is the only non-terminal state. No transition leaves
/// `Approved` or `Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Awaiting approval or expiry.
    Pending,
    /// Approved exactly once; terminal.
    Approved,
    /// Deadline passed or explicitly expired; terminal.
    Expired,
}

/// Caller-supplied inputs for creating an approval session.
#[derive(Debug, Clone)]
pub struct SessionParams {
    /// 64-hex digest of the document under approval.
    pub document_digest: String,
    /// Storage path of the document (opaque to the core).
    pub document_path: String,
    /// Display name of the document.
    pub document_name: String,
    /// Approval intent text as entered; canonicalized on creation.
    pub intent_text: String,
    /// Session lifetime in milliseconds.
    pub ttl_ms: u64,
}

/// A mutable coordination record gating creation of one attestation record.
///
/// Not itself cryptographically signed. Transitions take `&mut self`, so
/// exclusive access is the atomicity discipline: under shared use the
/// session must sit behind a lock, and the check-expiry-then-transition
/// sequence inside [`approve`](Self::approve) runs as a single unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalSession {
    /// Unique session id.
    pub id: String,
    /// Secure access token for the approval link.
    pub access_token: String,
    /// 64-hex digest of the document under approval.
    pub document_digest: String,
    /// Storage path of the document.
    pub document_path: String,
    /// Display name of the document.
    pub document_name: String,
    /// Canonical approval intent text.
    pub intent_text: String,
    /// Digest of the canonical intent text.
    pub intent_digest: String,
    /// Creation time, epoch milliseconds.
    pub created_at: u64,
    /// Deadline, epoch milliseconds.
    pub expires_at: u64,
    status: SessionStatus,
    approved_at: Option<u64>,
    record_ref: Option<String>,
}

impl ApprovalSession {
    /// Creates a session in `Pending` with a fresh id and access token.
    ///
    /// The intent text is canonicalized and its digest derived here, so the
    /// session and the eventual attestation record agree on the intent
    /// bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidExpiry`] if `ttl_ms` is zero.
    pub fn create(params: SessionParams, now: u64) -> Result<Self, SessionError> {
        let expires_at = now.saturating_add(params.ttl_ms);
        if expires_at <= now {
            return Err(SessionError::InvalidExpiry {
                created_at: now,
                expires_at,
            });
        }

        let intent_text = canonicalize_intent(&params.intent_text);
        let intent_digest = digest_text(&intent_text);

        let mut token = [0u8; ACCESS_TOKEN_BYTES];
        OsRng.fill_bytes(&mut token);

        let session = Self {
            id: Uuid::new_v4().to_string(),
            access_token: hex::encode(token),
            document_digest: params.document_digest,
            document_path: params.document_path,
            document_name: params.document_name,
            intent_text,
            intent_digest,
            created_at: now,
            expires_at,
            status: SessionStatus::Pending,
            approved_at: None,
            record_ref: None,
        };
        debug!(session_id = %session.id, expires_at, "approval session created");
        Ok(session)
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> SessionStatus {
        self.status
    }

    /// Approval time, set exactly once on the `Pending` → `Approved`
    /// transition.
    #[must_use]
    pub const fn approved_at(&self) -> Option<u64> {
        self.approved_at
    }

    /// Reference to the attestation record, set on approval.
    #[must_use]
    pub fn record_ref(&self) -> Option<&str> {
        self.record_ref.as_deref()
    }

    /// Whether an `approve` call would currently succeed.
    #[must_use]
    pub fn can_approve(&self, now: u64) -> bool {
        self.status == SessionStatus::Pending && now <= self.expires_at
    }

    /// Transitions `Pending` → `Approved`, attaching the attestation record
    /// reference and the approval time.
    ///
    /// Succeeds at most once per session. A call past the deadline moves the
    /// session to `Expired` (expiry is a data-level comparison, not a
    /// scheduled event) and rejects.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyApproved`] from `Approved`;
    /// [`SessionError::Expired`] from `Expired` or past the deadline.
    pub fn approve(&mut self, record_ref: &str, now: u64) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Approved => {
                warn!(session_id = %self.id, "approve rejected: already approved");
                Err(SessionError::AlreadyApproved {
                    session_id: self.id.clone(),
                })
            },
            SessionStatus::Expired => {
                warn!(session_id = %self.id, "approve rejected: expired");
                Err(SessionError::Expired {
                    session_id: self.id.clone(),
                })
            },
            SessionStatus::Pending => {
                if now > self.expires_at {
                    self.status = SessionStatus::Expired;
                    warn!(session_id = %self.id, "approve rejected: deadline passed");
                    return Err(SessionError::Expired {
                        session_id: self.id.clone(),
                    });
                }
                self.status = SessionStatus::Approved;
                self.approved_at = Some(now);
                self.record_ref = Some(record_ref.to_string());
                debug!(session_id = %self.id, record_ref, "session approved");
                Ok(())
            },
        }
    }

    /// Transitions `Pending` → `Expired`.
    ///
    /// Idempotent on an already-`Expired` session.
    ///
    /// # Errors
    ///
    /// [`SessionError::AlreadyApproved`] from `Approved` — an approved
    /// session never becomes expired.
    pub fn expire(&mut self) -> Result<(), SessionError> {
        match self.status {
            SessionStatus::Approved => Err(SessionError::AlreadyApproved {
                session_id: self.id.clone(),
            }),
            SessionStatus::Expired => Ok(()),
            SessionStatus::Pending => {
                self.status = SessionStatus::Expired;
                debug!(session_id = %self.id, "session expired");
                Ok(())
            },
        }
    }
}
