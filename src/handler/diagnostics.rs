//! Diagnostics for messages that could not be handed to a handler.
//!
//! The registry never fails a delivery. Instead it reports a [`Diagnostic`]
//! to its [`DiagnosticSink`]; the default [`TracingSink`] logs through
//! `tracing`, leaving subscriber setup to the embedding application.

use std::fmt;

use crate::error::DecodeError;
use crate::protocol::ResponseType;

/// Something the registry could not deliver.
#[derive(Debug)]
pub enum Diagnostic<'a> {
    /// Payload decoded but no handler took it: none is registered for its
    /// tag, or the registered one declined the response.
    Unhandled {
        /// Tag of the dropped response.
        response_type: ResponseType,
    },
    /// Payload could not be decoded.
    Rejected {
        /// Tag as delivered by the transport.
        tag: &'a str,
        /// Why decoding failed.
        error: &'a DecodeError,
    },
}

impl Diagnostic<'_> {
    /// Tag the diagnostic is about, as delivered.
    pub fn tag(&self) -> &str {
        match self {
            Diagnostic::Unhandled { response_type } => response_type.as_str(),
            Diagnostic::Rejected { tag, .. } => *tag,
        }
    }
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Unhandled { response_type } => write!(
                f,
                "received a response of type \"{response_type}\" but no handler was registered for it"
            ),
            Diagnostic::Rejected { tag, error } => write!(
                f,
                "received a response of type \"{tag}\" but was not able to parse the data: {error}"
            ),
        }
    }
}

/// Receiver for [`Diagnostic`]s.
///
/// Any `Fn(&Diagnostic<'_>) + Send + Sync` closure is a sink.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Report one diagnostic.
    fn report(&self, diagnostic: &Diagnostic<'_>);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Diagnostic<'_>) + Send + Sync + 'static,
{
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        self(diagnostic)
    }
}

/// Default sink: logs through `tracing`.
///
/// Unhandled tags are logged at `warn` (expected while wiring up a UI),
/// decode failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::Unhandled { response_type } => {
                tracing::warn!(tag = %response_type, "{}", diagnostic);
            }
            Diagnostic::Rejected { tag, error } => {
                tracing::error!(tag = %tag, error = %error, "{}", diagnostic);
            }
        }
    }
}
