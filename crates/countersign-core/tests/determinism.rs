//! Property tests for the determinism guarantees of the protocol: digest
//! stability and avalanche, payload byte-determinism, canonicalization
//! idempotence, and tamper sensitivity under random byte flips.

use countersign_core::{
    AttestationRecord, RecordFields, SignablePayload, Signer, canonicalize_intent, digest_bytes,
    is_valid_digest, verify_document,
};
use proptest::prelude::*;

fn record_over(document: &[u8], signer: &Signer) -> AttestationRecord {
    AttestationRecord::create(
        RecordFields {
            document_digest: digest_bytes(document),
            intent_text: "Approve X".to_string(),
            approver_ref: "user-42".to_string(),
            approver_label: "Dana Example".to_string(),
            event_time: 1_700_000_000_000,
            presence_ref: "presence-1".to_string(),
            presence_digest: digest_bytes(b"presence"),
            assisted_flag: false,
        },
        signer,
    )
    .unwrap()
}

proptest! {
    /// Determinism: the same bytes digest identically across calls.
    #[test]
    fn prop_digest_deterministic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert_eq!(digest_bytes(&bytes), digest_bytes(&bytes));
    }

    /// Digest shape: every digest is 64 lowercase hex characters.
    #[test]
    fn prop_digest_shape(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        prop_assert!(is_valid_digest(&digest_bytes(&bytes)));
    }

    /// Avalanche: flipping any single bit produces a different digest.
    #[test]
    fn prop_digest_avalanche(
        bytes in proptest::collection::vec(any::<u8>(), 1..256),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let mut flipped = bytes.clone();
        let i = index.index(flipped.len());
        flipped[i] ^= 1 << bit;
        prop_assert_ne!(digest_bytes(&bytes), digest_bytes(&flipped));
    }

    /// Canonicalization idempotence over arbitrary text.
    #[test]
    fn prop_canonicalize_idempotent(text in ".*") {
        let once = canonicalize_intent(&text);
        prop_assert_eq!(canonicalize_intent(&once), once);
    }

    /// Canonicalization absorbs line-ending and indentation variance.
    #[test]
    fn prop_canonicalize_absorbs_formatting(words in proptest::collection::vec("[a-zA-Z]{1,8}", 1..8)) {
        let spaced = words.join(" ");
        let tabbed = words.join("\t\t");
        let padded = format!("  {}  ", words.join("   "));
        prop_assert_eq!(canonicalize_intent(&tabbed), canonicalize_intent(&spaced));
        prop_assert_eq!(canonicalize_intent(&padded), canonicalize_intent(&spaced));
    }

    /// Payload determinism: two builds over the same fields are
    /// byte-identical, whatever the field contents.
    #[test]
    fn prop_payload_deterministic(
        intent in "[a-zA-Z0-9 ]{1,64}",
        approver in "[a-z0-9-]{1,16}",
        event_time in 1u64..u64::MAX / 2,
        assisted in any::<bool>(),
    ) {
        let document_digest = digest_bytes(b"doc");
        let intent_digest = digest_bytes(intent.as_bytes());
        let presence_digest = digest_bytes(b"presence");
        let payload = SignablePayload {
            version: "1.0",
            document_digest: &document_digest,
            intent_digest: &intent_digest,
            intent_text: &intent,
            approver_ref: &approver,
            approver_label: "Dana Example",
            event_time,
            presence_ref: "presence-1",
            presence_digest: &presence_digest,
            assisted_flag: assisted,
        };
        prop_assert_eq!(payload.to_bytes(), payload.to_bytes());
    }

    /// Tamper sensitivity: a random single-byte flip anywhere in the
    /// document never verifies.
    #[test]
    fn prop_document_flip_never_verifies(
        bytes in proptest::collection::vec(any::<u8>(), 1..128),
        index in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let signer = Signer::from_bytes(&[21u8; 32]).unwrap();
        let record = record_over(&bytes, &signer);

        let mut flipped = bytes.clone();
        let i = index.index(flipped.len());
        flipped[i] ^= 1 << bit;

        let outcome = verify_document(&flipped, &record);
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.reason_code(), Some("document_altered"));
    }

    /// Tamper sensitivity: shifting the event time by any amount never
    /// verifies.
    #[test]
    fn prop_event_time_shift_never_verifies(shift in 1u64..1_000_000) {
        let signer = Signer::from_bytes(&[22u8; 32]).unwrap();
        let mut record = record_over(b"stable document", &signer);
        record.event_time += shift;

        let outcome = verify_document(b"stable document", &record);
        prop_assert!(!outcome.valid);
        prop_assert_eq!(outcome.reason_code(), Some("signature_not_authentic"));
    }
}

/// Cross-process determinism anchor: a fixed key and fixed fields produce a
/// fixed payload, so the signature over it is reproducible indefinitely.
#[test]
fn fixed_fields_reproduce_fixed_payload_bytes() {
    let signer = Signer::from_bytes(&[1u8; 32]).unwrap();
    let record = record_over(b"hello", &signer);
    let rebuilt = record_over(b"hello", &signer);
    assert_eq!(record.signature_bytes, rebuilt.signature_bytes);
    assert_eq!(
        record.signable_payload().to_bytes(),
        rebuilt.signable_payload().to_bytes()
    );
}
