//! Compact wire codec for attestation records.
//!
//! One canonical internal structure ([`AttestationRecord`]) with two
//! serialization forms rather than two parallel type definitions:
//!
//! - **Encode** always emits the compact transfer encoding: short keys in a
//!   fixed order, digests as lowercase hex, signature and public key as
//!   base64.
//! - **Decode** accepts each field under either its long name or its short
//!   code, since either may appear at the system boundary.
//!
//! Short key table (1:1 with the long names):
//!
//! | long | short | | long | short |
//! |------|-------|-|------|-------|
//! | `version` | `v` | | `event_time` | `et` |
//! | `document_digest` | `dd` | | `presence_ref` | `pr` |
//! | `intent_digest` | `id` | | `presence_digest` | `pd` |
//! | `intent_text` | `it` | | `assisted_flag` | `af` |
//! | `approver_ref` | `ar` | | `signature_bytes` | `sig` |
//! | `approver_label` | `al` | | `signing_public_key` | `pk` |
//!
//! Decoding is fail-closed: unknown or mismatched `schema_version` values
//! are rejected, as are missing fields and type mismatches. No field is ever
//! defaulted.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::canonical::SCHEMA_VERSION;
use crate::record::AttestationRecord;

/// Errors from decoding a wire-format record.
///
/// These are format errors in the §7 taxonomy: the record could not be
/// evaluated at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The input is not valid JSON or not a JSON object.
    #[error("malformed record JSON: {message}")]
    Parse {
        /// Description of the parse failure.
        message: String,
    },

    /// A required field is absent under both its long and short key.
    #[error("missing record field: {field}")]
    MissingField {
        /// Long name of the missing field.
        field: &'static str,
    },

    /// A field is present but has the wrong JSON type.
    #[error("wrong type for record field: {field}")]
    WrongType {
        /// Long name of the mistyped field.
        field: &'static str,
    },

    /// The record declares a schema version this codec does not speak.
    #[error("unsupported schema version: expected {expected:?}, found {found:?}")]
    UnsupportedVersion {
        /// The version this codec supports.
        expected: &'static str,
        /// The version the record declared.
        found: String,
    },

    /// A base64 field failed to decode.
    #[error("invalid base64 in record field: {field}")]
    InvalidBase64 {
        /// Long name of the offending field.
        field: &'static str,
    },
}

/// Compact transfer encoding, short keys in fixed declaration order.
#[derive(Serialize)]
struct WireRecord<'a> {
    v: &'a str,
    dd: &'a str,
    id: &'a str,
    it: &'a str,
    ar: &'a str,
    al: &'a str,
    et: u64,
    pr: &'a str,
    pd: &'a str,
    af: bool,
    sig: String,
    pk: String,
}

/// Serializes a record to the compact transfer encoding.
#[must_use]
pub fn serialize_record(record: &AttestationRecord) -> String {
    let wire = WireRecord {
        v: &record.schema_version,
        dd: &record.document_digest,
        id: &record.intent_digest,
        it: &record.intent_text,
        ar: &record.approver_ref,
        al: &record.approver_label,
        et: record.event_time,
        pr: &record.presence_ref,
        pd: &record.presence_digest,
        af: record.assisted_flag,
        sig: BASE64.encode(&record.signature_bytes),
        pk: BASE64.encode(&record.signing_public_key),
    };
    serde_json::to_string(&wire).expect("wire serialization is infallible")
}

/// Looks a field up under its long name, then its short code.
fn lookup<'a>(
    object: &'a serde_json::Map<String, Value>,
    long: &'static str,
    short: &str,
) -> Option<&'a Value> {
    object.get(long).or_else(|| object.get(short))
}

fn require_str(
    object: &serde_json::Map<String, Value>,
    long: &'static str,
    short: &str,
) -> Result<String, CodecError> {
    match lookup(object, long, short) {
        None => Err(CodecError::MissingField { field: long }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CodecError::WrongType { field: long }),
    }
}

fn require_u64(
    object: &serde_json::Map<String, Value>,
    long: &'static str,
    short: &str,
) -> Result<u64, CodecError> {
    match lookup(object, long, short) {
        None => Err(CodecError::MissingField { field: long }),
        Some(Value::Number(n)) => n.as_u64().ok_or(CodecError::WrongType { field: long }),
        Some(_) => Err(CodecError::WrongType { field: long }),
    }
}

fn require_bool(
    object: &serde_json::Map<String, Value>,
    long: &'static str,
    short: &str,
) -> Result<bool, CodecError> {
    match lookup(object, long, short) {
        None => Err(CodecError::MissingField { field: long }),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(CodecError::WrongType { field: long }),
    }
}

fn require_base64(
    object: &serde_json::Map<String, Value>,
    long: &'static str,
    short: &str,
) -> Result<Vec<u8>, CodecError> {
    let encoded = require_str(object, long, short)?;
    BASE64
        .decode(encoded.as_bytes())
        .map_err(|_| CodecError::InvalidBase64 { field: long })
}

/// Deserializes a record from its wire encoding.
///
/// Accepts each field under either its long name or its short code. The
/// declared schema version must match exactly.
///
/// # Errors
///
/// Returns a [`CodecError`] for malformed JSON, missing or mistyped fields,
/// invalid base64, or an unsupported schema version.
pub fn deserialize_record(input: &str) -> Result<AttestationRecord, CodecError> {
    let value: Value = serde_json::from_str(input).map_err(|e| CodecError::Parse {
        message: e.to_string(),
    })?;
    let object = value.as_object().ok_or_else(|| CodecError::Parse {
        message: "record must be a JSON object".to_string(),
    })?;

    // Version gate before anything else: a record in an unknown format must
    // not be half-interpreted.
    let schema_version = require_str(object, "version", "v")?;
    if schema_version != SCHEMA_VERSION {
        return Err(CodecError::UnsupportedVersion {
            expected: SCHEMA_VERSION,
            found: schema_version,
        });
    }

    Ok(AttestationRecord {
        schema_version,
        document_digest: require_str(object, "document_digest", "dd")?,
        intent_digest: require_str(object, "intent_digest", "id")?,
        intent_text: require_str(object, "intent_text", "it")?,
        approver_ref: require_str(object, "approver_ref", "ar")?,
        approver_label: require_str(object, "approver_label", "al")?,
        event_time: require_u64(object, "event_time", "et")?,
        presence_ref: require_str(object, "presence_ref", "pr")?,
        presence_digest: require_str(object, "presence_digest", "pd")?,
        assisted_flag: require_bool(object, "assisted_flag", "af")?,
        signature_bytes: require_base64(object, "signature_bytes", "sig")?,
        signing_public_key: require_base64(object, "signing_public_key", "pk")?,
    })
}
