//! Record types: the signed attestation, its presence-proof evidence, and
//! the wire codec.
//!
//! Creation flows one direction: validated fields → canonical payload →
//! signature → immutable [`AttestationRecord`]. The [`PresenceRecord`] is
//! created alongside and bound into the attestation by digest, never
//! embedded. The [`codec`] submodule carries records across the system
//! boundary in a compact short-key encoding and reads back both long-name
//! and short-code forms.

mod attestation;
mod codec;
mod presence;

pub use attestation::{AttestationRecord, RecordError, RecordFields};
pub use codec::{CodecError, deserialize_record, serialize_record};
pub use presence::{PresenceError, PresenceInput, PresenceRecord};
