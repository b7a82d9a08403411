//! Approval session error types.

use thiserror::Error;

/// Errors rejecting an approval session transition.
///
/// Both rejections are loud by contract: callers must be able to tell an
/// already-approved session apart from an expired one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session was already approved; approval happens exactly once.
    #[error("session already approved: {session_id}")]
    AlreadyApproved {
        /// The session id.
        session_id: String,
    },

    /// The session expired before the transition was attempted.
    #[error("session expired: {session_id}")]
    Expired {
        /// The session id.
        session_id: String,
    },

    /// Session creation was given a deadline not after the creation time.
    #[error("session expiry {expires_at} is not after creation time {created_at}")]
    InvalidExpiry {
        /// Creation time, epoch milliseconds.
        created_at: u64,
        /// Rejected expiry, epoch milliseconds.
        expires_at: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_name_the_session() {
        let err = SessionError::AlreadyApproved {
            session_id: "session-9".to_string(),
        };
        assert!(err.to_string().contains("session-9"));

        let err = SessionError::Expired {
            session_id: "session-9".to_string(),
        };
        assert!(err.to_string().contains("session-9"));
    }

    #[test]
    fn invalid_expiry_names_both_timestamps() {
        let err = SessionError::InvalidExpiry {
            created_at: 100,
            expires_at: 100,
        };
        let text = err.to_string();
        assert!(text.contains("100"));
    }
}
