//! Request identifiers.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::DecodeError;
use crate::ladder::ID_EXPECTED;
use crate::number::{float_eq, hash_float};
use crate::path::DecodePath;
use crate::value::JsonValue;

/// A legal JSON-RPC `id`: string, number or null.
///
/// `String("1")`, `Integer(1)` and `Float(1.0)` are three different ids.
#[derive(Debug, Clone, Default)]
pub enum RpcId {
    String(String),
    Integer(i64),
    Float(f64),
    #[default]
    Null,
}

impl RpcId {
    pub fn is_null(&self) -> bool {
        matches!(self, RpcId::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RpcId::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RpcId::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RpcId::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl PartialEq for RpcId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RpcId::String(a), RpcId::String(b)) => a == b,
            (RpcId::Integer(a), RpcId::Integer(b)) => a == b,
            (RpcId::Float(a), RpcId::Float(b)) => float_eq(*a, *b),
            (RpcId::Null, RpcId::Null) => true,
            _ => false,
        }
    }
}

impl Eq for RpcId {}

impl Hash for RpcId {
    fn hash<H: Hasher>(&self, h: &mut H) {
        std::mem::discriminant(self).hash(h);
        match self {
            RpcId::String(s) => s.hash(h),
            RpcId::Integer(i) => i.hash(h),
            RpcId::Float(f) => hash_float(*f, h),
            RpcId::Null => {}
        }
    }
}

/// Compact JSON text: strings are quoted.
impl fmt::Display for RpcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

impl From<i64> for RpcId {
    fn from(i: i64) -> Self {
        RpcId::Integer(i)
    }
}

impl From<i32> for RpcId {
    fn from(i: i32) -> Self {
        RpcId::Integer(i64::from(i))
    }
}

impl From<u32> for RpcId {
    fn from(i: u32) -> Self {
        RpcId::Integer(i64::from(i))
    }
}

impl From<f64> for RpcId {
    fn from(f: f64) -> Self {
        RpcId::Float(f)
    }
}

impl From<&str> for RpcId {
    fn from(s: &str) -> Self {
        RpcId::String(s.to_string())
    }
}

impl From<String> for RpcId {
    fn from(s: String) -> Self {
        RpcId::String(s)
    }
}

impl From<RpcId> for JsonValue {
    fn from(id: RpcId) -> Self {
        match id {
            RpcId::String(s) => JsonValue::String(s),
            RpcId::Integer(i) => JsonValue::Integer(i),
            RpcId::Float(f) => JsonValue::Float(f),
            RpcId::Null => JsonValue::Null,
        }
    }
}

impl TryFrom<JsonValue> for RpcId {
    type Error = DecodeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(s) => Ok(RpcId::String(s)),
            JsonValue::Integer(i) => Ok(RpcId::Integer(i)),
            JsonValue::Float(f) => Ok(RpcId::Float(f)),
            JsonValue::Null => Ok(RpcId::Null),
            JsonValue::Object(_) | JsonValue::Array(_) | JsonValue::Boolean(_) => {
                Err(DecodeError::TypeMismatch {
                    path: DecodePath::root(),
                    expected: ID_EXPECTED,
                })
            }
        }
    }
}
