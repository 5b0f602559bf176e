//! Decode and encode error types.

use thiserror::Error;

use crate::path::DecodePath;

/// Failure to build a [`JsonValue`](crate::JsonValue) or [`RpcId`](crate::RpcId)
/// from an input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The node is neither a keyed container, a sequential container nor a scalar.
    #[error("did not match any container at `{path}`")]
    NoMatchingContainer { path: DecodePath },
    /// The node is scalar-shaped but none of the accepted scalar kinds matched.
    #[error("type mismatch at `{path}`: value is not a {expected}")]
    TypeMismatch {
        path: DecodePath,
        expected: &'static str,
    },
    /// The byte-level front-end rejected the input before any node existed.
    #[error("malformed {format} input: {message}")]
    Malformed {
        format: &'static str,
        message: String,
    },
}

impl DecodeError {
    /// Path from the root to the failing node, if the failure happened inside
    /// the node tree.
    pub fn path(&self) -> Option<&DecodePath> {
        match self {
            DecodeError::NoMatchingContainer { path } | DecodeError::TypeMismatch { path, .. } => {
                Some(path)
            }
            DecodeError::Malformed { .. } => None,
        }
    }

    pub(crate) fn malformed(format: &'static str, err: impl std::fmt::Display) -> Self {
        let message = err.to_string();
        tracing::debug!(format, error = %message, "front-end rejected input");
        DecodeError::Malformed { format, message }
    }
}

/// Failure reported by the output sink while encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("write failed: {0}")]
    WriteFailed(String),
}

impl From<serde_json::Error> for EncodeError {
    fn from(err: serde_json::Error) -> Self {
        EncodeError::WriteFailed(err.to_string())
    }
}

impl<E: std::fmt::Debug> From<ciborium::ser::Error<E>> for EncodeError {
    fn from(err: ciborium::ser::Error<E>) -> Self {
        EncodeError::WriteFailed(format!("{err:?}"))
    }
}

/// Either half of a transcoding operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    #[test]
    fn messages_include_pointer_path() {
        let err = DecodeError::TypeMismatch {
            path: DecodePath::from(vec![PathSegment::Key("a".into()), PathSegment::Index(1)]),
            expected: "string, number, bool or null",
        };
        assert_eq!(
            err.to_string(),
            "type mismatch at `/a/1`: value is not a string, number, bool or null"
        );
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("/a/1"));
    }

    #[test]
    fn malformed_has_no_path() {
        let err = DecodeError::malformed("JSON", "EOF while parsing");
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "malformed JSON input: EOF while parsing");
    }

    #[test]
    fn umbrella_wraps_both_sides() {
        let err: Error = EncodeError::WriteFailed("disk full".into()).into();
        assert_eq!(err.to_string(), "encode failed: write failed: disk full");
        let err: Error = DecodeError::NoMatchingContainer {
            path: DecodePath::root(),
        }
        .into();
        assert!(matches!(err, Error::Decode(_)));
    }
}
