//! Field names of keyed containers.
//!
//! A key is its string. The integer view exists for sources whose maps are
//! keyed by numbers (CBOR) and for serde map adapters that hand out integer
//! keys.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Key of an object entry, with an optional integer view.
#[derive(Debug, Clone)]
pub struct MapKey {
    string: String,
    int: Option<i64>,
}

impl MapKey {
    /// Stores `s` verbatim. The integer view is `s` parsed as `i64`, if it parses.
    pub fn from_string(s: impl Into<String>) -> Self {
        let string = s.into();
        let int = string.parse().ok();
        Self { string, int }
    }

    /// Stores the decimal text of `i` and records `i` as the integer view.
    pub fn from_int(i: i64) -> Self {
        Self {
            string: i.to_string(),
            int: Some(i),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.string
    }

    pub fn into_string(self) -> String {
        self.string
    }

    pub fn to_int(&self) -> Option<i64> {
        self.int
    }
}

impl PartialEq for MapKey {
    fn eq(&self, other: &Self) -> bool {
        self.string == other.string
    }
}

impl Eq for MapKey {}

impl Hash for MapKey {
    fn hash<H: Hasher>(&self, h: &mut H) {
        self.string.hash(h);
    }
}

impl PartialOrd for MapKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MapKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.string.cmp(&other.string)
    }
}

impl Borrow<str> for MapKey {
    fn borrow(&self) -> &str {
        &self.string
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.string)
    }
}

impl From<&str> for MapKey {
    fn from(s: &str) -> Self {
        MapKey::from_string(s)
    }
}

impl From<String> for MapKey {
    fn from(s: String) -> Self {
        MapKey::from_string(s)
    }
}

impl From<i64> for MapKey {
    fn from(i: i64) -> Self {
        MapKey::from_int(i)
    }
}

impl From<MapKey> for String {
    fn from(key: MapKey) -> Self {
        key.string
    }
}

impl Serialize for MapKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.string)
    }
}

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MapKeyVisitor;

        impl<'de> Visitor<'de> for MapKeyVisitor {
            type Value = MapKey;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer map key")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(MapKey::from_string(value))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(MapKey::from_string(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(MapKey::from_int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                i64::try_from(value)
                    .map(MapKey::from_int)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
            }
        }

        deserializer.deserialize_any(MapKeyVisitor)
    }
}
