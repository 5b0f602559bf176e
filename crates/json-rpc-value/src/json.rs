//! JSON text front-end.
//!
//! Text is parsed into a `serde_json::Value` tree, which is then walked as an
//! [`InputNode`].
//!
//! The parser's recursion limit is disabled. Nesting depth is bounded only by
//! the calling thread's stack: input nested deeper than the stack can hold
//! overflows it and aborts the process rather than returning an error.
//! Callers decoding untrusted text must cap depth or size before calling in.

use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{DecodeError, EncodeError};
use crate::id::RpcId;
use crate::key::MapKey;
use crate::node::{Decode, InputNode};
use crate::value::JsonValue;

const FORMAT: &str = "JSON";

impl InputNode for Value {
    fn keyed(&self) -> Option<Vec<(MapKey, &Self)>> {
        self.as_object().map(|map| {
            map.iter()
                .map(|(key, value)| (MapKey::from_string(key.as_str()), value))
                .collect()
        })
    }

    fn sequence(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
    }

    fn is_scalar(&self) -> bool {
        !matches!(self, Value::Object(_) | Value::Array(_))
    }

    fn string(&self) -> Option<&str> {
        self.as_str()
    }

    fn integer(&self) -> Option<i64> {
        self.as_i64()
    }

    /// Any JSON number, including integers outside the `i64` range.
    fn float(&self) -> Option<f64> {
        self.as_f64()
    }

    fn boolean(&self) -> Option<bool> {
        self.as_bool()
    }

    fn is_null(&self) -> bool {
        Value::is_null(self)
    }
}

fn parse(bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut de = serde_json::Deserializer::from_slice(bytes);
    de.disable_recursion_limit();
    let node = Value::deserialize(&mut de).map_err(|err| DecodeError::malformed(FORMAT, err))?;
    de.end().map_err(|err| DecodeError::malformed(FORMAT, err))?;
    Ok(node)
}

/// Decodes JSON bytes.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> Result<T, DecodeError> {
    T::decode(&parse(bytes)?)
}

/// Decodes JSON text.
pub fn from_str<T: Decode>(text: &str) -> Result<T, DecodeError> {
    from_slice(text.as_bytes())
}

/// Output settings for [`JsonEncoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Two-space indented output instead of compact.
    pub pretty: bool,
}

impl EncodeOptions {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

/// Writes values as JSON text.
///
/// Objects come out in key order, so equal values always produce identical
/// bytes.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    options: EncodeOptions,
}

impl JsonEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EncodeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> EncodeOptions {
        self.options
    }

    pub fn encode_to_writer<W, T>(&self, writer: W, value: &T) -> Result<(), EncodeError>
    where
        W: io::Write,
        T: Serialize + ?Sized,
    {
        if self.options.pretty {
            let mut ser =
                serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"  "));
            value.serialize(&mut ser)?;
        } else {
            let mut ser = serde_json::Serializer::new(writer);
            value.serialize(&mut ser)?;
        }
        Ok(())
    }

    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut out = Vec::new();
        self.encode_to_writer(&mut out, value)?;
        Ok(out)
    }

    pub fn encode_to_string<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodeError> {
        let bytes = self.encode(value)?;
        String::from_utf8(bytes).map_err(|err| EncodeError::WriteFailed(err.to_string()))
    }
}

/// Compact JSON bytes.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    JsonEncoder::new().encode(value)
}

/// Compact JSON text.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String, EncodeError> {
    JsonEncoder::new().encode_to_string(value)
}

/// Compact JSON written to `writer`.
pub fn to_writer<W: io::Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<(), EncodeError> {
    JsonEncoder::new().encode_to_writer(writer, value)
}

impl FromStr for JsonValue {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}

impl FromStr for RpcId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        from_str(s)
    }
}

/// Non-finite floats become `null`.
impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
            JsonValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            JsonValue::String(s) => Value::String(s),
            JsonValue::Integer(i) => Value::from(i),
            JsonValue::Float(f) => Value::from(f),
            JsonValue::Boolean(b) => Value::Bool(b),
            JsonValue::Null => Value::Null,
        }
    }
}

impl From<RpcId> for Value {
    fn from(id: RpcId) -> Self {
        Value::from(JsonValue::from(id))
    }
}

impl TryFrom<Value> for JsonValue {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        JsonValue::decode(&value)
    }
}

impl TryFrom<Value> for RpcId {
    type Error = DecodeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        RpcId::decode(&value)
    }
}
