//! Error types for response-bridge.

use thiserror::Error;

/// Reasons a payload could not be turned into a typed [`Response`](crate::protocol::Response).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Tag outside the closed [`ResponseType`](crate::protocol::ResponseType) enumeration.
    #[error("unrecognized response type '{0}'")]
    UnknownTag(String),

    /// Required field or nested entity is absent or null.
    #[error("missing field '{field}'")]
    MissingField {
        /// Location of the field, e.g. `children[1].layer_data`.
        field: String,
    },

    /// Field is present but holds the wrong kind of value.
    #[error("field '{field}' expected {expected}, found {found}")]
    InvalidType {
        /// Location of the field.
        field: String,
        /// Expected kind of value.
        expected: &'static str,
        /// Kind of value actually received.
        found: &'static str,
    },

    /// String outside a closed enumeration.
    #[error("field '{field}' holds invalid {enumeration} variant '{value}'")]
    InvalidVariant {
        /// Location of the field.
        field: String,
        /// Name of the enumeration.
        enumeration: &'static str,
        /// Offending value, as received.
        value: String,
    },

    /// Path element that cannot be widened to `u64`.
    #[error("field '{field}' holds invalid path element {value} at index {index}")]
    InvalidPathElement {
        /// Location of the path field.
        field: String,
        /// Position of the element inside the path.
        index: usize,
        /// Offending value, as received.
        value: String,
    },

    /// JSON body could not be parsed.
    #[error("JSON payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// MsgPack body could not be parsed.
    #[error("MsgPack payload error: {0}")]
    MsgPack(#[from] rmp_serde::decode::Error),
}

impl DecodeError {
    /// Prefix the field location with the enclosing field, so errors raised
    /// by nested converters point at the full location.
    pub(crate) fn within(mut self, parent: &str) -> Self {
        match &mut self {
            DecodeError::MissingField { field }
            | DecodeError::InvalidType { field, .. }
            | DecodeError::InvalidVariant { field, .. }
            | DecodeError::InvalidPathElement { field, .. } => {
                *field = format!("{parent}.{field}");
            }
            DecodeError::UnknownTag(_) | DecodeError::Json(_) | DecodeError::MsgPack(_) => {}
        }
        self
    }

    /// Field location carried by this error, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            DecodeError::MissingField { field }
            | DecodeError::InvalidType { field, .. }
            | DecodeError::InvalidVariant { field, .. }
            | DecodeError::InvalidPathElement { field, .. } => Some(field.as_str()),
            DecodeError::UnknownTag(_) | DecodeError::Json(_) | DecodeError::MsgPack(_) => None,
        }
    }
}

/// Errors raised by the delivery task handle.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Delivery task has stopped.
    #[error("delivery task closed")]
    Closed,

    /// Delivery channel is at capacity.
    #[error("delivery channel full")]
    Full,
}

/// Result type alias using [`DecodeError`].
pub type Result<T> = std::result::Result<T, DecodeError>;
