//! JSON codec using `serde_json`.
//!
//! Integers are parsed exactly, so path elements up to `u64::MAX` keep
//! their full width.

use crate::error::Result;
use crate::protocol::RawPayload;

/// JSON codec for payload bodies.
pub struct JsonCodec;

impl JsonCodec {
    /// Decode JSON text into a raw payload tree.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Json`](crate::error::DecodeError::Json) if the
    /// bytes are not valid JSON.
    #[inline]
    pub fn decode(bytes: &[u8]) -> Result<RawPayload> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
