//! CBOR front-end.
//!
//! A second wire format, backed by `ciborium`. CBOR can carry things JSON
//! cannot, which the decode ladder reports instead of guessing:
//!
//! - byte strings and tagged items are scalars with no matching kind
//!   ([`DecodeError::TypeMismatch`]);
//! - maps keyed by anything other than text or integers have no usable
//!   shape ([`DecodeError::NoMatchingContainer`]).
//!
//! Integer map keys become their decimal text. Floats with an exact `i64`
//! value decode as integers, as they do for JSON text.
//!
//! The parser's recursion limit is lifted. Depth is bounded only by the
//! calling thread's stack, and exhausting it aborts the process instead of
//! returning an error.

use ciborium::value::Value as CborValue;
use serde::Serialize;

use crate::error::{DecodeError, EncodeError, Error};
use crate::key::MapKey;
use crate::node::{Decode, InputNode};
use crate::value::JsonValue;

fn map_key(key: &CborValue) -> Option<MapKey> {
    match key {
        CborValue::Text(s) => Some(MapKey::from_string(s.as_str())),
        CborValue::Integer(i) => i64::try_from(*i).ok().map(MapKey::from_int),
        _ => None,
    }
}

impl InputNode for CborValue {
    fn keyed(&self) -> Option<Vec<(MapKey, &Self)>> {
        match self {
            CborValue::Map(entries) => entries
                .iter()
                .map(|(key, value)| map_key(key).map(|key| (key, value)))
                .collect(),
            _ => None,
        }
    }

    fn sequence(&self) -> Option<&[Self]> {
        match self {
            CborValue::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, CborValue::Map(_) | CborValue::Array(_))
    }

    fn string(&self) -> Option<&str> {
        match self {
            CborValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn integer(&self) -> Option<i64> {
        match self {
            CborValue::Integer(i) => i64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Floats, plus integers too wide for `i64`.
    fn float(&self) -> Option<f64> {
        match self {
            CborValue::Float(f) => Some(*f),
            CborValue::Integer(i) => Some(i128::from(*i) as f64),
            _ => None,
        }
    }

    fn boolean(&self) -> Option<bool> {
        match self {
            CborValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn is_null(&self) -> bool {
        matches!(self, CborValue::Null)
    }
}

/// Decodes one CBOR item.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    let node: CborValue = ciborium::de::from_reader_with_recursion_limit(bytes, usize::MAX)
        .map_err(|err| DecodeError::malformed("CBOR", format!("{err:?}")))?;
    T::decode(&node)
}

/// Encodes any serializable value as CBOR.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out)?;
    Ok(out)
}

/// Re-encodes JSON text as CBOR.
pub fn json_to_cbor(json: &[u8]) -> Result<Vec<u8>, Error> {
    let value: JsonValue = crate::json::from_slice(json)?;
    Ok(to_vec(&value)?)
}

/// Re-encodes a CBOR item as compact JSON text.
pub fn cbor_to_json(cbor: &[u8]) -> Result<Vec<u8>, Error> {
    let value: JsonValue = from_slice(cbor)?;
    Ok(crate::json::to_vec(&value)?)
}
