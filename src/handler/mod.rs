//! Handler module - response dispatch.
//!
//! Provides:
//! - [`ResponseRegistry`] - maps response tags to thread-safe handlers
//! - [`LocalRegistry`] - the same for handlers that stay on one thread
//! - [`DiagnosticSink`] - receives reports for undeliverable messages
//!
//! # Example
//!
//! ```
//! use response_bridge::handler::{Diagnostic, ResponseRegistry};
//! use response_bridge::protocol::{ResponseType, UpdateWorkingColors};
//! use serde_json::json;
//!
//! let mut registry = ResponseRegistry::with_sink(|d: &Diagnostic<'_>| eprintln!("{d}"));
//!
//! // Typed handler for one record
//! registry.on(|colors: UpdateWorkingColors| {
//!     assert_eq!(colors.primary.red, 255.0);
//! });
//!
//! // Untyped handler receiving the whole response
//! registry.register(ResponseType::DocumentChanged, |response| {
//!     assert_eq!(response.response_type(), ResponseType::DocumentChanged);
//! });
//!
//! registry.notify("DocumentChanged", &json!(null));
//! ```

mod diagnostics;
mod registry;

pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use registry::{
    Dispatch, FnHandler, Handler, HandlerRegistry, LocalHandler, LocalRegistry, ResponseRegistry,
    TypedHandler,
};
