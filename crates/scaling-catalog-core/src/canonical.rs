//! Canonical CBOR encoding of tracked transaction entries.
//!
//! Entries are encoded as CBOR (RFC 8949) with deterministic rules:
//! - Map keys: text keys, sorted by their encoded bytes
//! - Integers: smallest valid encoding
//! - Lengths: definite only
//! - Floats: always IEEE 754 double precision, finite only
//! - Absent optional fields are omitted, never encoded as null
//!
//! The `id` field is never part of the encoding: the id is derived from it.
//!
//! **CRITICAL**: changing this encoding changes every tracked transaction id.

use ciborium::value::{Integer, Value};

use crate::crypto::Blake3Hash;
use crate::error::{CoreError, Result};
use crate::tracked_tx::{TrackedTxConfigEntry, TrackedTxParams};
use crate::types::TrackedTxId;

/// Domain separation prefix for tracked transaction ids.
pub const TRACKED_TX_ID_DOMAIN: &[u8] = b"scaling-catalog/tracked-tx-id/v1";

/// CBOR map key names.
mod keys {
    pub const PROJECT_ID: &str = "projectId";
    pub const SINCE_TIMESTAMP: &str = "sinceTimestamp";
    pub const UNTIL_TIMESTAMP: &str = "untilTimestamp";
    pub const TYPE: &str = "type";
    pub const SUBTYPE: &str = "subtype";
    pub const COST_MULTIPLIER: &str = "costMultiplier";
    pub const PARAMS: &str = "params";

    pub const FORMULA: &str = "formula";
    pub const ADDRESS: &str = "address";
    pub const SELECTOR: &str = "selector";
    pub const FROM: &str = "from";
    pub const TO: &str = "to";
    pub const PROGRAM_HASHES: &str = "programHashes";
}

/// Encode an entry, minus its id, to canonical CBOR bytes.
pub fn canonical_entry_bytes(entry: &TrackedTxConfigEntry) -> Result<Vec<u8>> {
    let value = entry_to_cbor_value(entry);
    encode_cbor_canonical(&value)
}

/// Derive the content-addressed id of an entry.
///
/// `id = Blake3(TRACKED_TX_ID_DOMAIN || canonical_entry_bytes(entry))`
pub fn tracked_tx_id(entry: &TrackedTxConfigEntry) -> Result<TrackedTxId> {
    let bytes = canonical_entry_bytes(entry)?;
    Ok(TrackedTxId(
        Blake3Hash::hash_with_domain(TRACKED_TX_ID_DOMAIN, &bytes).0,
    ))
}

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn entry_to_cbor_value(entry: &TrackedTxConfigEntry) -> Value {
    let mut entries = vec![
        (text(keys::PROJECT_ID), text(entry.project_id.as_str())),
        (
            text(keys::SINCE_TIMESTAMP),
            Value::Integer(entry.since_timestamp.to_seconds().into()),
        ),
        (text(keys::TYPE), text(entry.tx_type.as_str())),
        (text(keys::SUBTYPE), text(entry.subtype.as_str())),
        (text(keys::PARAMS), params_to_cbor_value(&entry.params)),
    ];

    if let Some(until) = entry.until_timestamp {
        entries.push((
            text(keys::UNTIL_TIMESTAMP),
            Value::Integer(until.to_seconds().into()),
        ));
    }
    if let Some(multiplier) = entry.cost_multiplier {
        entries.push((text(keys::COST_MULTIPLIER), Value::Float(multiplier)));
    }

    Value::Map(entries)
}

fn params_to_cbor_value(params: &TrackedTxParams) -> Value {
    let entries = match params {
        TrackedTxParams::FunctionCall { address, selector } => vec![
            (text(keys::FORMULA), text("functionCall")),
            (text(keys::ADDRESS), Value::Bytes(address.0.to_vec())),
            (text(keys::SELECTOR), Value::Bytes(selector.0.to_vec())),
        ],
        TrackedTxParams::Transfer { from, to } => vec![
            (text(keys::FORMULA), text("transfer")),
            (text(keys::FROM), Value::Bytes(from.0.to_vec())),
            (text(keys::TO), Value::Bytes(to.0.to_vec())),
        ],
        TrackedTxParams::SharpSubmission {
            address,
            selector,
            program_hashes,
        } => vec![
            (text(keys::FORMULA), text("sharpSubmission")),
            (text(keys::ADDRESS), Value::Bytes(address.0.to_vec())),
            (text(keys::SELECTOR), Value::Bytes(selector.0.to_vec())),
            (
                text(keys::PROGRAM_HASHES),
                Value::Array(program_hashes.iter().map(|h| text(h)).collect()),
            ),
        ],
    };
    Value::Map(entries)
}

/// Encode a CBOR value to canonical bytes.
fn encode_cbor_canonical(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Integer(i) => encode_integer(buf, *i),
        Value::Bytes(b) => encode_bytes(buf, b),
        Value::Text(s) => encode_text(buf, s),
        Value::Array(arr) => encode_array(buf, arr)?,
        Value::Map(entries) => encode_map_canonical(buf, entries)?,
        Value::Float(f) => encode_float(buf, *f)?,
        Value::Bool(b) => buf.push(if *b { 0xf5 } else { 0xf4 }),
        Value::Null => buf.push(0xf6),
        _ => return Err(CoreError::Encoding("unsupported CBOR value type".into())),
    }
    Ok(())
}

/// Major types 0 and 1.
fn encode_integer(buf: &mut Vec<u8>, i: Integer) {
    let n: i128 = i.into();
    if n >= 0 {
        encode_uint(buf, 0, n as u64);
    } else {
        // CBOR encodes -1 as 0, -2 as 1, etc.
        encode_uint(buf, 1, (-1 - n) as u64);
    }
}

fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<()> {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Major type 5, keys sorted by their encoded bytes.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<()> {
    let mut pairs = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        pairs.push((key_buf, v));
    }
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    encode_uint(buf, 5, pairs.len() as u64);
    for (key_bytes, value) in pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }
    Ok(())
}

/// Major type 7, always 64-bit.
fn encode_float(buf: &mut Vec<u8>, f: f64) -> Result<()> {
    if !f.is_finite() {
        return Err(CoreError::Encoding(format!("non-finite float: {f}")));
    }
    // -0.0 and 0.0 compare equal and must hash equal.
    let f = if f == 0.0 { 0.0 } else { f };
    buf.push(0xfb);
    buf.extend_from_slice(&f.to_bits().to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracked_tx::{TrackedTxSubtype, TrackedTxType};
    use crate::types::{EthereumAddress, FunctionSelector, ProjectId, UnixTime};

    fn entry() -> TrackedTxConfigEntry {
        TrackedTxConfigEntry {
            id: TrackedTxId::ZERO,
            project_id: ProjectId::new("arbitrum"),
            since_timestamp: UnixTime::new(1661457944),
            until_timestamp: None,
            tx_type: TrackedTxType::L2Costs,
            subtype: TrackedTxSubtype::BatchSubmissions,
            cost_multiplier: Some(0.6),
            params: TrackedTxParams::FunctionCall {
                address: EthereumAddress::from_bytes([0x1c; 20]),
                selector: FunctionSelector::from_bytes([0x8f, 0x11, 0x1f, 0x3c]),
            },
        }
    }

    #[test]
    fn test_canonical_encoding_deterministic() {
        let e = entry();
        assert_eq!(
            canonical_entry_bytes(&e).unwrap(),
            canonical_entry_bytes(&e).unwrap()
        );
    }

    #[test]
    fn test_id_ignores_current_id() {
        let mut e = entry();
        let before = tracked_tx_id(&e).unwrap();
        e.id = TrackedTxId::from_bytes([0xff; 32]);
        assert_eq!(tracked_tx_id(&e).unwrap(), before);
    }

    #[test]
    fn test_absent_until_differs_from_present() {
        let a = entry();
        let mut b = entry();
        b.until_timestamp = Some(UnixTime::new(1700000000));
        assert_ne!(tracked_tx_id(&a).unwrap(), tracked_tx_id(&b).unwrap());
    }

    #[test]
    fn test_output_is_valid_cbor() {
        let bytes = canonical_entry_bytes(&entry()).unwrap();
        let decoded: Value = ciborium::from_reader(bytes.as_slice()).unwrap();
        let map = match decoded {
            Value::Map(m) => m,
            other => panic!("expected map, got {other:?}"),
        };
        assert_eq!(map.len(), 6);
        assert!(map
            .iter()
            .any(|(k, v)| k == &text(keys::COST_MULTIPLIER) && v == &Value::Float(0.6)));
    }

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 65535);
        assert_eq!(buf, vec![0x19, 0xff, 0xff]);

        buf.clear();
        encode_integer(&mut buf, (-1i64).into());
        assert_eq!(buf, vec![0x20]);
    }

    #[test]
    fn test_map_key_ordering() {
        // Shorter text keys sort first: the length is part of the header byte.
        let mut buf = Vec::new();
        let entries = vec![
            (text("bb"), Value::Integer(2.into())),
            (text("a"), Value::Integer(1.into())),
            (text("ab"), Value::Integer(3.into())),
        ];
        encode_map_canonical(&mut buf, &entries).unwrap();
        assert_eq!(
            buf,
            vec![0xa3, 0x61, b'a', 0x01, 0x62, b'a', b'b', 0x03, 0x62, b'b', b'b', 0x02]
        );
    }

    #[test]
    fn test_float_encoding() {
        let mut buf = Vec::new();
        encode_float(&mut buf, 1.0).unwrap();
        assert_eq!(buf, vec![0xfb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);

        let mut neg_zero = Vec::new();
        let mut zero = Vec::new();
        encode_float(&mut neg_zero, -0.0).unwrap();
        encode_float(&mut zero, 0.0).unwrap();
        assert_eq!(neg_zero, zero);
    }

    #[test]
    fn test_non_finite_float_rejected() {
        let mut e = entry();
        e.cost_multiplier = Some(f64::NAN);
        assert!(matches!(
            canonical_entry_bytes(&e),
            Err(CoreError::Encoding(_))
        ));
    }
}
