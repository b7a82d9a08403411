//! Deterministic construction of the signable payload.
//!
//! The payload is the exact byte sequence the Ed25519 signature covers. It
//! is compact JSON with a **frozen key order** for schema version "1.0":
//!
//! ```text
//! version, document_digest, intent_digest, intent_text, approver_ref,
//! approver_label, event_time, presence_ref, presence_digest, assisted_flag
//! ```
//!
//! `signature_bytes` and `signing_public_key` are never part of the payload:
//! they are the output of signing, and including them would make the payload
//! depend on its own signature.
//!
//! Determinism comes from a struct with declared field order rather than any
//! map container: serde serializes struct fields in declaration order, JSON
//! string escaping is minimal and fixed, and the timestamp is an integer
//! with locale-independent decimal formatting. Signing and verification must
//! reconstruct identical bytes from identical field values on any platform,
//! indefinitely — reordering these fields breaks every signature already
//! issued.

use serde::Serialize;

/// Schema version of the record wire format and payload key order.
pub const SCHEMA_VERSION: &str = "1.0";

/// The ordered signable field set.
///
/// Field declaration order IS the wire key order; do not reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignablePayload<'a> {
    /// Wire format version literal.
    pub version: &'a str,
    /// 64-hex SHA-256 digest of the document bytes.
    pub document_digest: &'a str,
    /// 64-hex SHA-256 digest of the canonical intent text.
    pub intent_digest: &'a str,
    /// The canonical intent text itself.
    pub intent_text: &'a str,
    /// Opaque system-asserted approver reference.
    pub approver_ref: &'a str,
    /// Approver display name.
    pub approver_label: &'a str,
    /// Signing moment, integer milliseconds since epoch.
    pub event_time: u64,
    /// Opaque reference to the presence-proof record.
    pub presence_ref: &'a str,
    /// Digest binding the presence-proof content at signing time.
    pub presence_digest: &'a str,
    /// Disclosure flag for assisted approval.
    pub assisted_flag: bool,
}

impl SignablePayload<'_> {
    /// Serializes the payload to its canonical byte sequence.
    ///
    /// Compact JSON, no whitespace, fields in declaration order. A
    /// byte-exact function of the field values alone.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("payload serialization is infallible for string/int/bool fields")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_DIGEST: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const INTENT_DIGEST: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
    const PRESENCE_DIGEST: &str = "cccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccccc";

    fn sample() -> SignablePayload<'static> {
        SignablePayload {
            version: SCHEMA_VERSION,
            document_digest: DOC_DIGEST,
            intent_digest: INTENT_DIGEST,
            intent_text: "Approve X",
            approver_ref: "user-42",
            approver_label: "Dana Example",
            event_time: 1_700_000_000_123,
            presence_ref: "presence-1",
            presence_digest: PRESENCE_DIGEST,
            assisted_flag: false,
        }
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let payload = sample();
        assert_eq!(payload.to_bytes(), payload.to_bytes());
    }

    #[test]
    fn key_order_is_frozen() {
        let bytes = sample().to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        let expected_order = [
            "\"version\"",
            "\"document_digest\"",
            "\"intent_digest\"",
            "\"intent_text\"",
            "\"approver_ref\"",
            "\"approver_label\"",
            "\"event_time\"",
            "\"presence_ref\"",
            "\"presence_digest\"",
            "\"assisted_flag\"",
        ];
        let mut last = 0;
        for key in expected_order {
            let pos = text.find(key).unwrap_or_else(|| panic!("missing key {key}"));
            assert!(pos > last || last == 0, "key {key} out of order in {text}");
            last = pos;
        }
    }

    #[test]
    fn output_is_compact() {
        let text = String::from_utf8(sample().to_bytes()).unwrap();
        assert!(!text.contains(": "));
        assert!(!text.contains(", "));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn exact_bytes_for_known_fields() {
        let payload = SignablePayload {
            version: "1.0",
            document_digest: "d0",
            intent_digest: "i0",
            intent_text: "Approve X",
            approver_ref: "u1",
            approver_label: "A",
            event_time: 42,
            presence_ref: "p1",
            presence_digest: "pd",
            assisted_flag: true,
        };
        assert_eq!(
            String::from_utf8(payload.to_bytes()).unwrap(),
            r#"{"version":"1.0","document_digest":"d0","intent_digest":"i0","intent_text":"Approve X","approver_ref":"u1","approver_label":"A","event_time":42,"presence_ref":"p1","presence_digest":"pd","assisted_flag":true}"#
        );
    }

    #[test]
    fn field_change_changes_bytes() {
        let base = sample();
        let mut shifted = sample();
        shifted.event_time += 1;
        assert_ne!(base.to_bytes(), shifted.to_bytes());

        let mut flipped = sample();
        flipped.assisted_flag = !flipped.assisted_flag;
        assert_ne!(base.to_bytes(), flipped.to_bytes());
    }

    #[test]
    fn intent_text_is_escaped_deterministically() {
        let payload = SignablePayload {
            intent_text: "line\nbreak \"quoted\"",
            ..sample()
        };
        let text = String::from_utf8(payload.to_bytes()).unwrap();
        assert!(text.contains(r#"line\nbreak \"quoted\""#));
    }
}
