//! Ordered rung policy used to decode untyped input.
//!
//! Decoding tries interpretations in a fixed order and keeps the first one
//! that fits. The orders live in the constants below so they can be read
//! and tested on their own:
//!
//! - container shape: [`SHAPE_ORDER`] (keyed, then sequential, then scalar);
//! - scalar kind of a [`JsonValue`]: [`VALUE_SCALARS`];
//! - scalar kind of an [`RpcId`]: [`ID_SCALARS`].
//!
//! Integer is tried before float, and the integer rung also accepts a
//! float whose value is exactly an `i64`. Integral literals such as `5`,
//! `5.0`, `1e3` or `-0` therefore always decode as `Integer`.
//!
//! Recursion is unbounded. Callers feeding untrusted input must limit depth
//! before handing the tree over.

use crate::error::DecodeError;
use crate::id::RpcId;
use crate::key::MapKey;
use crate::node::{Decode, InputNode};
use crate::number::exact_i64;
use crate::path::{DecodePath, PathSegment};
use crate::value::{JsonValue, Object};

pub(crate) const VALUE_EXPECTED: &str = "string, number, bool or null";
pub(crate) const ID_EXPECTED: &str = "string, number or null";

/// Structural shape of an input node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Keyed,
    Sequential,
    Scalar,
}

impl Shape {
    pub fn name(self) -> &'static str {
        match self {
            Shape::Keyed => "keyed",
            Shape::Sequential => "sequential",
            Shape::Scalar => "scalar",
        }
    }
}

pub const SHAPE_ORDER: [Shape; 3] = [Shape::Keyed, Shape::Sequential, Shape::Scalar];

/// Kind of a single-value input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    String,
    Integer,
    Float,
    Boolean,
    Null,
}

pub const VALUE_SCALARS: [ScalarKind; 5] = [
    ScalarKind::String,
    ScalarKind::Integer,
    ScalarKind::Float,
    ScalarKind::Boolean,
    ScalarKind::Null,
];

pub const ID_SCALARS: [ScalarKind; 4] = [
    ScalarKind::String,
    ScalarKind::Integer,
    ScalarKind::Float,
    ScalarKind::Null,
];

impl ScalarKind {
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Boolean => "boolean",
            ScalarKind::Null => "null",
        }
    }

    /// Reads `node` as this kind only.
    pub fn read<N: InputNode>(self, node: &N) -> Option<JsonValue> {
        match self {
            ScalarKind::String => node.string().map(|s| JsonValue::String(s.to_string())),
            ScalarKind::Integer => node
                .integer()
                .or_else(|| node.float().and_then(exact_i64))
                .map(JsonValue::Integer),
            ScalarKind::Float => node.float().map(JsonValue::Float),
            ScalarKind::Boolean => node.boolean().map(JsonValue::Boolean),
            ScalarKind::Null => node.is_null().then_some(JsonValue::Null),
        }
    }
}

/// Result of the first rung in `order` that accepts `node`.
pub fn first_scalar<N: InputNode>(node: &N, order: &[ScalarKind]) -> Option<JsonValue> {
    order.iter().find_map(|kind| {
        let hit = kind.read(node);
        if hit.is_none() {
            tracing::trace!(rung = kind.name(), "scalar rung missed");
        }
        hit
    })
}

struct Decoder {
    path: DecodePath,
}

impl Decoder {
    fn new() -> Self {
        Self {
            path: DecodePath::root(),
        }
    }

    fn value<N: InputNode>(&mut self, node: &N) -> Result<JsonValue, DecodeError> {
        for shape in SHAPE_ORDER {
            if let Some(result) = self.try_shape(shape, node) {
                return result;
            }
            tracing::trace!(shape = shape.name(), path = %self.path, "shape missed");
        }
        Err(DecodeError::NoMatchingContainer {
            path: self.path.clone(),
        })
    }

    /// `None` when the node does not have `shape`.
    fn try_shape<N: InputNode>(
        &mut self,
        shape: Shape,
        node: &N,
    ) -> Option<Result<JsonValue, DecodeError>> {
        match shape {
            Shape::Keyed => node.keyed().map(|entries| self.object(entries)),
            Shape::Sequential => node.sequence().map(|items| self.array(items)),
            Shape::Scalar => node.is_scalar().then(|| self.scalar(node)),
        }
    }

    fn object<N: InputNode>(&mut self, entries: Vec<(MapKey, &N)>) -> Result<JsonValue, DecodeError> {
        let mut map = Object::new();
        for (key, child) in entries {
            self.path.push(PathSegment::Key(key.as_str().to_string()));
            let value = self.value(child)?;
            self.path.pop();
            map.insert(key.into_string(), value);
        }
        Ok(JsonValue::Object(map))
    }

    fn array<N: InputNode>(&mut self, items: &[N]) -> Result<JsonValue, DecodeError> {
        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            self.path.push(PathSegment::Index(index));
            out.push(self.value(item)?);
            self.path.pop();
        }
        Ok(JsonValue::Array(out))
    }

    fn scalar<N: InputNode>(&mut self, node: &N) -> Result<JsonValue, DecodeError> {
        first_scalar(node, &VALUE_SCALARS).ok_or_else(|| DecodeError::TypeMismatch {
            path: self.path.clone(),
            expected: VALUE_EXPECTED,
        })
    }
}

fn log_failure(err: DecodeError) -> DecodeError {
    tracing::debug!(error = %err, "decode failed");
    err
}

impl Decode for JsonValue {
    fn decode<N: InputNode>(node: &N) -> Result<Self, DecodeError> {
        Decoder::new().value(node).map_err(log_failure)
    }
}

impl Decode for RpcId {
    fn decode<N: InputNode>(node: &N) -> Result<Self, DecodeError> {
        let value = first_scalar(node, &ID_SCALARS).ok_or(DecodeError::TypeMismatch {
            path: DecodePath::root(),
            expected: ID_EXPECTED,
        });
        value.and_then(RpcId::try_from).map_err(log_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built node covering shapes that JSON text cannot express.
    #[derive(Debug)]
    enum Fake {
        Map(Vec<(MapKey, Fake)>),
        Seq(Vec<Fake>),
        Text(&'static str),
        Int(i64),
        Real(f64),
        Flag(bool),
        Nil,
        /// Scalar-shaped value of an unsupported kind.
        Blob,
        /// Not a container and not a scalar.
        Opaque,
        /// Answers both the string and integer reads.
        Ambiguous,
        /// Answers both the integer and float reads.
        Numeric(i64),
    }

    impl InputNode for Fake {
        fn keyed(&self) -> Option<Vec<(MapKey, &Self)>> {
            match self {
                Fake::Map(entries) => Some(entries.iter().map(|(k, v)| (k.clone(), v)).collect()),
                _ => None,
            }
        }

        fn sequence(&self) -> Option<&[Self]> {
            match self {
                Fake::Seq(items) => Some(items.as_slice()),
                _ => None,
            }
        }

        fn is_scalar(&self) -> bool {
            !matches!(self, Fake::Map(_) | Fake::Seq(_) | Fake::Opaque)
        }

        fn string(&self) -> Option<&str> {
            match self {
                Fake::Text(s) => Some(*s),
                Fake::Ambiguous => Some("42"),
                _ => None,
            }
        }

        fn integer(&self) -> Option<i64> {
            match self {
                Fake::Int(i) | Fake::Numeric(i) => Some(*i),
                Fake::Ambiguous => Some(42),
                _ => None,
            }
        }

        fn float(&self) -> Option<f64> {
            match self {
                Fake::Real(f) => Some(*f),
                Fake::Numeric(i) => Some(*i as f64),
                _ => None,
            }
        }

        fn boolean(&self) -> Option<bool> {
            match self {
                Fake::Flag(b) => Some(*b),
                _ => None,
            }
        }

        fn is_null(&self) -> bool {
            matches!(self, Fake::Nil)
        }
    }

    #[test]
    fn ladder_orders_are_fixed() {
        assert_eq!(SHAPE_ORDER, [Shape::Keyed, Shape::Sequential, Shape::Scalar]);
        let names: Vec<_> = VALUE_SCALARS.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["string", "integer", "float", "boolean", "null"]);
        let names: Vec<_> = ID_SCALARS.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["string", "integer", "float", "null"]);
    }

    #[test]
    fn each_rung_in_isolation() {
        let cases = [
            (ScalarKind::String, Fake::Text("a"), JsonValue::from("a")),
            (ScalarKind::Integer, Fake::Int(-9), JsonValue::Integer(-9)),
            (ScalarKind::Float, Fake::Real(0.25), JsonValue::Float(0.25)),
            (ScalarKind::Boolean, Fake::Flag(false), JsonValue::Boolean(false)),
            (ScalarKind::Null, Fake::Nil, JsonValue::Null),
        ];
        for (kind, node, expected) in cases {
            assert_eq!(kind.read(&node), Some(expected), "{kind:?}");
            for other in VALUE_SCALARS.iter().filter(|k| **k != kind) {
                assert_eq!(other.read(&node), None, "{other:?} accepted {node:?}");
            }
        }
    }

    #[test]
    fn string_wins_over_integer() {
        assert_eq!(
            JsonValue::decode(&Fake::Ambiguous),
            Ok(JsonValue::from("42"))
        );
        assert_eq!(RpcId::decode(&Fake::Ambiguous), Ok(RpcId::from("42")));
    }

    #[test]
    fn integer_wins_over_float() {
        assert_eq!(JsonValue::decode(&Fake::Numeric(5)), Ok(JsonValue::Integer(5)));
        assert_eq!(RpcId::decode(&Fake::Numeric(5)), Ok(RpcId::Integer(5)));
        assert_eq!(first_scalar(&Fake::Numeric(5), &[ScalarKind::Float]), Some(JsonValue::Float(5.0)));
    }

    #[test]
    fn integral_floats_take_the_integer_rung() {
        assert_eq!(JsonValue::decode(&Fake::Real(7.0)), Ok(JsonValue::Integer(7)));
        assert_eq!(JsonValue::decode(&Fake::Real(-0.0)), Ok(JsonValue::Integer(0)));
        assert_eq!(RpcId::decode(&Fake::Real(1e3)), Ok(RpcId::Integer(1000)));
        assert_eq!(JsonValue::decode(&Fake::Real(7.5)), Ok(JsonValue::Float(7.5)));
        assert_eq!(JsonValue::decode(&Fake::Real(1e19)), Ok(JsonValue::Float(1e19)));
        assert_eq!(JsonValue::decode(&Fake::Real(f64::NAN)).map(|v| v.kind()), Ok("float"));
    }

    #[test]
    fn failed_rungs_leave_the_node_usable() {
        let node = Fake::Nil;
        for kind in &VALUE_SCALARS[..4] {
            assert_eq!(kind.read(&node), None);
        }
        assert_eq!(ScalarKind::Null.read(&node), Some(JsonValue::Null));
    }

    #[test]
    fn empty_containers() {
        assert_eq!(
            JsonValue::decode(&Fake::Map(Vec::new())),
            Ok(JsonValue::Object(Object::new()))
        );
        assert_eq!(JsonValue::decode(&Fake::Seq(Vec::new())), Ok(JsonValue::Array(Vec::new())));
    }

    #[test]
    fn opaque_node_matches_no_container() {
        let err = JsonValue::decode(&Fake::Opaque).expect_err("opaque");
        assert_eq!(
            err,
            DecodeError::NoMatchingContainer {
                path: DecodePath::root()
            }
        );
    }

    #[test]
    fn unsupported_scalar_is_a_type_mismatch_with_path() {
        let node = Fake::Map(vec![(
            MapKey::from("a"),
            Fake::Seq(vec![Fake::Int(1), Fake::Map(vec![(MapKey::from_int(3), Fake::Blob)])]),
        )]);
        let err = JsonValue::decode(&node).expect_err("blob");
        assert_eq!(
            err,
            DecodeError::TypeMismatch {
                path: DecodePath::from(vec![
                    PathSegment::Key("a".into()),
                    PathSegment::Index(1),
                    PathSegment::Key("3".into()),
                ]),
                expected: VALUE_EXPECTED,
            }
        );
        assert_eq!(err.to_string(), "type mismatch at `/a/1/3`: value is not a string, number, bool or null");
    }

    #[test]
    fn first_error_wins() {
        let node = Fake::Seq(vec![Fake::Opaque, Fake::Blob]);
        let err = JsonValue::decode(&node).expect_err("opaque first");
        assert!(matches!(err, DecodeError::NoMatchingContainer { .. }));
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("/0"));
    }

    #[test]
    fn id_rejects_containers_and_booleans() {
        for node in [Fake::Map(Vec::new()), Fake::Seq(Vec::new()), Fake::Flag(true), Fake::Blob] {
            let err = RpcId::decode(&node).expect_err("not an id");
            assert_eq!(
                err,
                DecodeError::TypeMismatch {
                    path: DecodePath::root(),
                    expected: ID_EXPECTED,
                }
            );
        }
    }

    #[test]
    fn id_scalars() {
        assert_eq!(RpcId::decode(&Fake::Text("x")), Ok(RpcId::from("x")));
        assert_eq!(RpcId::decode(&Fake::Int(3)), Ok(RpcId::Integer(3)));
        assert_eq!(RpcId::decode(&Fake::Real(3.5)), Ok(RpcId::Float(3.5)));
        assert_eq!(RpcId::decode(&Fake::Nil), Ok(RpcId::Null));
    }

    #[test]
    fn integer_map_keys_become_strings() {
        let node = Fake::Map(vec![(MapKey::from_int(10), Fake::Flag(true))]);
        let value = JsonValue::decode(&node).expect("decode");
        assert_eq!(value.get("10"), Some(&JsonValue::Boolean(true)));
    }

    #[test]
    fn deep_nesting_has_no_limit() {
        let mut node = Fake::Int(0);
        for _ in 0..500 {
            node = Fake::Seq(vec![node]);
        }
        let mut value = JsonValue::decode(&node).expect("deep");
        let mut depth = 0;
        while let JsonValue::Array(mut items) = value {
            value = items.pop().expect("single child");
            depth += 1;
        }
        assert_eq!(depth, 500);
        assert_eq!(value, JsonValue::Integer(0));
    }
}
