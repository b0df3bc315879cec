//! Codec module - encoded payload bodies to raw payload trees.
//!
//! Transports that hand over encoded bodies instead of value trees use:
//!
//! - [`JsonCodec`] - JSON text via `serde_json`
//! - [`MsgPackCodec`] - MessagePack via `rmp-serde`
//!
//! [`Payload`] bundles a body with its encoding so decoding can happen on the
//! dispatching side, where failures become diagnostics.
//!
//! # Design
//!
//! Codecs are marker structs with static methods rather than trait objects.

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;

use bytes::Bytes;

use crate::error::Result;
use crate::protocol::RawPayload;

/// A message body, either already a value tree or still encoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Value tree handed over by the transport.
    Value(RawPayload),
    /// JSON text.
    Json(Bytes),
    /// MessagePack bytes.
    MsgPack(Bytes),
}

impl Payload {
    /// Decode the body into a raw payload tree.
    ///
    /// # Errors
    ///
    /// Returns the codec's error if an encoded body is malformed.
    pub fn into_value(self) -> Result<RawPayload> {
        match self {
            Payload::Value(value) => Ok(value),
            Payload::Json(bytes) => JsonCodec::decode(&bytes),
            Payload::MsgPack(bytes) => MsgPackCodec::decode(&bytes),
        }
    }
}

impl From<RawPayload> for Payload {
    fn from(value: RawPayload) -> Self {
        Payload::Value(value)
    }
}
