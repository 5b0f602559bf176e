//! serde integration.
//!
//! Encoding writes the active variant straight into any [`Serializer`]; there
//! is no coercion between variants. Decoding visits whatever the
//! deserializer reports and applies the same number rule as the decode
//! ladder, so `JsonValue` and `RpcId` can sit inside derived envelope structs
//! of any self-describing format. Map keys go through [`MapKey`], so integer
//! keys (CBOR) become their decimal text.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DecodeError;
use crate::id::RpcId;
use crate::key::MapKey;
use crate::ladder::ID_EXPECTED;
use crate::number::exact_i64;
use crate::path::DecodePath;
use crate::value::{JsonValue, Object};

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            JsonValue::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Integer(i) => serializer.serialize_i64(*i),
            JsonValue::Float(f) => serializer.serialize_f64(*f),
            JsonValue::Boolean(b) => serializer.serialize_bool(*b),
            JsonValue::Null => serializer.serialize_unit(),
        }
    }
}

impl Serialize for RpcId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            RpcId::String(s) => serializer.serialize_str(s),
            RpcId::Integer(i) => serializer.serialize_i64(*i),
            RpcId::Float(f) => serializer.serialize_f64(*f),
            RpcId::Null => serializer.serialize_unit(),
        }
    }
}

/// Numbers follow the decode ladder: integers that fit `i64` and floats with
/// an exact `i64` value become `Integer`, everything else numeric `Float`.
fn number_from_u128(value: u128) -> JsonValue {
    i64::try_from(value)
        .map(JsonValue::Integer)
        .unwrap_or(JsonValue::Float(value as f64))
}

fn number_from_i128(value: i128) -> JsonValue {
    i64::try_from(value)
        .map(JsonValue::Integer)
        .unwrap_or(JsonValue::Float(value as f64))
}

fn number_from_f64(value: f64) -> JsonValue {
    exact_i64(value)
        .map(JsonValue::Integer)
        .unwrap_or(JsonValue::Float(value))
}

struct JsonValueVisitor;

impl<'de> Visitor<'de> for JsonValueVisitor {
    type Value = JsonValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any JSON value")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
        Ok(JsonValue::Boolean(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(JsonValue::Integer(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
        Ok(number_from_u128(u128::from(value)))
    }

    fn visit_i128<E>(self, value: i128) -> Result<Self::Value, E> {
        Ok(number_from_i128(value))
    }

    fn visit_u128<E>(self, value: u128) -> Result<Self::Value, E> {
        Ok(number_from_u128(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
        Ok(number_from_f64(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(JsonValue::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(JsonValue::String(value))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(JsonValue::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::new();
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(JsonValue::Array(items))
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut object = Object::new();
        while let Some((key, value)) = map.next_entry::<MapKey, JsonValue>()? {
            object.insert(key.into_string(), value);
        }
        Ok(JsonValue::Object(object))
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(JsonValueVisitor)
    }
}

fn not_an_id<E: de::Error>() -> E {
    E::custom(DecodeError::TypeMismatch {
        path: DecodePath::root(),
        expected: ID_EXPECTED,
    })
}

struct RpcIdVisitor;

impl<'de> Visitor<'de> for RpcIdVisitor {
    type Value = RpcId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or null")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RpcId::String(value.to_string()))
    }

    fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
        Ok(RpcId::String(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
        Ok(RpcId::Integer(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        RpcId::try_from(number_from_u128(u128::from(value))).map_err(E::custom)
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
        RpcId::try_from(number_from_i128(value)).map_err(E::custom)
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
        RpcId::try_from(number_from_u128(value)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        RpcId::try_from(number_from_f64(value)).map_err(E::custom)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(RpcId::Null)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(RpcId::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Err(not_an_id())
    }

    fn visit_seq<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        Err(not_an_id())
    }

    fn visit_map<A>(self, _: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        Err(not_an_id())
    }
}

impl<'de> Deserialize<'de> for RpcId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(RpcIdVisitor)
    }
}
