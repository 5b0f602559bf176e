//! Structured input consumed by the decoder.
//!
//! A node never changes while it is read: every method takes `&self`, so a
//! failed read leaves nothing consumed and the next interpretation sees the
//! same input.

use crate::error::DecodeError;
use crate::key::MapKey;

/// A node of some self-describing input tree.
///
/// Accessors return `None` (or `false`) when the node does not have the asked
/// shape or kind. Implementations must not coerce between kinds beyond what
/// the underlying format itself treats as the same value: a float is not an
/// integer, a string is not a number.
pub trait InputNode: Sized {
    /// Named fields, when the node is a keyed container. An empty container
    /// yields `Some(vec![])`.
    fn keyed(&self) -> Option<Vec<(MapKey, &Self)>>;

    /// Elements in order, when the node is a sequential container.
    fn sequence(&self) -> Option<&[Self]>;

    /// Whether the node is a single, non-container value.
    fn is_scalar(&self) -> bool;

    fn string(&self) -> Option<&str>;

    /// Integer payload. Must be `None` for values the format stores as floats.
    fn integer(&self) -> Option<i64>;

    fn float(&self) -> Option<f64>;

    fn boolean(&self) -> Option<bool>;

    fn is_null(&self) -> bool;
}

/// Types that can be built from an [`InputNode`] tree.
pub trait Decode: Sized {
    fn decode<N: InputNode>(node: &N) -> Result<Self, DecodeError>;
}
