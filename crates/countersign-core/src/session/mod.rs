//! Approval session lifecycle state machine.
//!
//! A session gates whether a signature may be produced for a given
//! document/intent pairing. It is the only mutable state on the core's
//! surface; everything cryptographic stays pure.
//!
//! # State Machine
//!
//! ```text
//!                  approve(record_ref)
//!     ┌─────────┐ ───────────────────► ┌──────────┐
//!     │ Pending │                      │ Approved │  (terminal)
//!     └────┬────┘                      └──────────┘
//!          │ expire() / deadline passed
//!          ▼
//!     ┌─────────┐
//!     │ Expired │  (terminal)
//!     └─────────┘
//! ```
//!
//! # Valid Transitions
//!
//! | From | Operation | To |
//! |------|-----------|----|
//! | `Pending` | `approve` (within deadline) | `Approved` |
//! | `Pending` | `approve` (past deadline) | `Expired`, rejected |
//! | `Pending` | `expire` | `Expired` |
//! | `Expired` | `expire` | `Expired` (no-op) |
//!
//! Approving an `Approved` or `Expired` session is a rejection the caller
//! can distinguish, never a silent success. Expiry is a comparison against
//! the stored deadline — there is no scheduler.
//!
//! # Atomicity
//!
//! Transitions take `&mut self`: the borrow checker enforces the
//! exclusive-access discipline, and concurrent callers sharing a session
//! behind a lock observe exactly one successful `approve`.

mod error;
mod state;


pub use error::SessionError;
pub use state::{ApprovalSession, SessionParams, SessionStatus};
