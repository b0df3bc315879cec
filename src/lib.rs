//! # response-bridge
//!
//! Typed decoder and dispatcher for responses emitted by an external engine.
//!
//! The engine runs in its own process (or other isolated context) and sends
//! messages as a tag string plus a loosely structured payload. This crate
//! turns each one into a typed [`Response`] and hands it to the handler
//! registered for that tag.
//!
//! ## Architecture
//!
//! - **Decoder** ([`decode`]): pure `(tag, payload) -> Response` conversion
//! - **Registry** ([`ResponseRegistry`]): tag -> at most one handler, with
//!   diagnostics for undecodable or unhandled messages
//! - **Delivery task** ([`bridge`]): optional channel-fed task for transports
//!   that deliver on several threads
//!
//! ## Example
//!
//! ```
//! use response_bridge::BridgeBuilder;
//! use response_bridge::protocol::ExpandFolder;
//! use serde_json::json;
//!
//! let registry = BridgeBuilder::new()
//!     .handle(|expand: ExpandFolder| {
//!         assert_eq!(expand.path.as_slice(), &[1, 2, 3]);
//!         assert!(expand.children.is_empty());
//!     })
//!     .build();
//!
//! registry.notify(
//!     "ExpandFolder",
//!     &json!({ "ExpandFolder": { "path": [1, 2, 3], "children": [] } }),
//! );
//! ```

pub mod bridge;
pub mod codec;
pub mod decode;
pub mod error;
pub mod handler;
pub mod protocol;

mod builder;

pub use bridge::{BridgeConfig, BridgeHandle};
pub use builder::BridgeBuilder;
pub use decode::{decode, decode_typed};
pub use error::{BridgeError, DecodeError};
pub use handler::{Diagnostic, DiagnosticSink, Dispatch, LocalRegistry, ResponseRegistry};
pub use protocol::{RawPayload, Response, ResponseType};
