//! Dynamically-shaped JSON values and JSON-RPC identifiers.
//!
//! [`JsonValue`] holds any JSON payload (params, results, error data) with
//! integers and floats kept apart. [`RpcId`] holds a request id: string,
//! number or null. Both decode from any [`InputNode`] tree by trying
//! interpretations in a fixed order (see [`ladder`]) and encode through any
//! `serde` serializer.
//!
//! Two wire formats ship with the crate: JSON text ([`json`]) and CBOR
//! ([`cbor`]).

mod codec;
mod error;
mod id;
mod key;
mod node;
mod number;
mod value;

pub mod cbor;
pub mod json;
pub mod ladder;
pub mod path;

pub use error::{DecodeError, EncodeError, Error};
pub use id::RpcId;
pub use json::{EncodeOptions, JsonEncoder};
pub use key::MapKey;
pub use node::{Decode, InputNode};
pub use path::{DecodePath, PathSegment};
pub use value::{JsonValue, Object};
