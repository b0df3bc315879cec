//! Handler registry for dispatching responses by tag.
//!
//! The registry maps each [`ResponseType`] to at most one handler.
//! Registering a second handler for the same tag replaces the first.
//!
//! [`ResponseRegistry`] holds `Send + Sync` handlers and can be moved into
//! the delivery task. [`LocalRegistry`] accepts handlers that stay on one
//! thread, such as closures capturing `Rc<RefCell<_>>` UI state.
//!
//! # Example
//!
//! ```
//! use response_bridge::handler::{Dispatch, ResponseRegistry};
//! use response_bridge::protocol::{ResponseType, SetActiveTool};
//! use serde_json::json;
//!
//! let mut registry = ResponseRegistry::new();
//!
//! registry.on(|tool: SetActiveTool| {
//!     assert_eq!(tool.tool_name, "Select");
//! });
//!
//! let outcome = registry.dispatch("SetActiveTool", &json!({ "tool_name": "Select" }));
//! assert!(matches!(outcome, Dispatch::Handled(ResponseType::SetActiveTool)));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::decode::decode;
use crate::error::DecodeError;
use crate::protocol::{RawPayload, Response, ResponseType, ResponseVariant};

/// Trait for response handlers confined to one thread.
pub trait LocalHandler: 'static {
    /// Handle a decoded response.
    ///
    /// Returns `false` if the handler does not accept this response, in
    /// which case the registry reports it as unhandled.
    fn call(&self, response: Response) -> bool;
}

/// Response handler that may be shared across threads.
///
/// Implemented for every `Send + Sync` [`LocalHandler`].
pub trait Handler: LocalHandler + Send + Sync {}

impl<H: LocalHandler + Send + Sync> Handler for H {}

/// Handler taking the whole [`Response`].
pub struct FnHandler<F>(F);

impl<F> FnHandler<F>
where
    F: Fn(Response) + 'static,
{
    /// Wrap a closure.
    pub fn new(handler: F) -> Self {
        Self(handler)
    }
}

impl<F> LocalHandler for FnHandler<F>
where
    F: Fn(Response) + 'static,
{
    fn call(&self, response: Response) -> bool {
        (self.0)(response);
        true
    }
}

/// Wrapper that extracts one record type before calling the handler.
pub struct TypedHandler<F, T>
where
    F: Fn(T) + 'static,
    T: ResponseVariant,
{
    handler: F,
    _phantom: PhantomData<fn(T)>,
}

impl<F, T> TypedHandler<F, T>
where
    F: Fn(T) + 'static,
    T: ResponseVariant,
{
    /// Create a new typed handler.
    pub fn new(handler: F) -> Self {
        Self {
            handler,
            _phantom: PhantomData,
        }
    }
}

impl<F, T> LocalHandler for TypedHandler<F, T>
where
    F: Fn(T) + 'static,
    T: ResponseVariant,
{
    fn call(&self, response: Response) -> bool {
        match T::from_response(response) {
            Some(record) => {
                (self.handler)(record);
                true
            }
            None => false,
        }
    }
}

/// Result of one [`HandlerRegistry::dispatch`] call.
#[derive(Debug)]
pub enum Dispatch {
    /// Response decoded and handed to its handler.
    Handled(ResponseType),
    /// Response decoded but no handler took it.
    Unhandled(ResponseType),
    /// Payload could not be decoded; no handler was called.
    Rejected(DecodeError),
}

impl Dispatch {
    /// Whether a handler was invoked.
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, Dispatch::Handled(_))
    }
}

/// Registry mapping response tags to handlers of kind `H`.
///
/// Use through [`ResponseRegistry`] or [`LocalRegistry`].
pub struct HandlerRegistry<H: ?Sized + LocalHandler> {
    /// Handlers by tag.
    handlers: HashMap<ResponseType, Box<H>>,
    /// Where undeliverable messages are reported.
    sink: Box<dyn DiagnosticSink>,
}

/// Registry of thread-safe handlers, usable from the delivery task.
pub type ResponseRegistry = HandlerRegistry<dyn Handler>;

/// Registry of single-threaded handlers.
pub type LocalRegistry = HandlerRegistry<dyn LocalHandler>;

impl<H: ?Sized + LocalHandler> HandlerRegistry<H> {
    /// Create an empty registry reporting through [`TracingSink`].
    pub fn new() -> Self {
        Self::with_sink(TracingSink)
    }

    /// Create an empty registry reporting to `sink`.
    pub fn with_sink<S: DiagnosticSink>(sink: S) -> Self {
        Self {
            handlers: HashMap::new(),
            sink: Box::new(sink),
        }
    }

    /// Replace the diagnostics sink.
    pub fn set_sink<S: DiagnosticSink>(&mut self, sink: S) {
        self.sink = Box::new(sink);
    }

    /// Register an already boxed handler.
    pub fn insert(&mut self, response_type: ResponseType, handler: Box<H>) {
        if self.handlers.insert(response_type, handler).is_some() {
            tracing::debug!(tag = %response_type, "Replaced response handler");
        }
    }

    /// Check whether a handler is registered for `response_type`.
    pub fn is_registered(&self, response_type: ResponseType) -> bool {
        self.handlers.contains_key(&response_type)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Decode a message and hand it to its handler.
    ///
    /// Never fails: decode errors and missing handlers are reported to the
    /// sink and returned as the outcome. The handler runs on the calling
    /// thread before this returns.
    pub fn dispatch(&self, tag: &str, payload: &RawPayload) -> Dispatch {
        match decode(tag, payload) {
            Ok(response) => self.deliver(response),
            Err(error) => self.reject(tag, error),
        }
    }

    /// Inbound entry point for the transport: [`dispatch`](Self::dispatch)
    /// with the outcome discarded.
    pub fn notify(&self, tag: &str, payload: &RawPayload) {
        let _ = self.dispatch(tag, payload);
    }

    /// Hand an already decoded response to its handler.
    pub fn deliver(&self, response: Response) -> Dispatch {
        let response_type = response.response_type();

        let handled = match self.handlers.get(&response_type) {
            Some(handler) => handler.call(response),
            None => false,
        };

        if handled {
            Dispatch::Handled(response_type)
        } else {
            self.sink.report(&Diagnostic::Unhandled { response_type });
            Dispatch::Unhandled(response_type)
        }
    }

    /// Report a message whose payload could not be decoded.
    pub(crate) fn reject(&self, tag: &str, error: DecodeError) -> Dispatch {
        self.sink.report(&Diagnostic::Rejected { tag, error: &error });
        Dispatch::Rejected(error)
    }
}

impl ResponseRegistry {
    /// Register a handler for `response_type`, replacing any previous one.
    pub fn register<F>(&mut self, response_type: ResponseType, handler: F)
    where
        F: Fn(Response) + Send + Sync + 'static,
    {
        self.insert(response_type, Box::new(FnHandler::new(handler)));
    }

    /// Register a handler for one record type, replacing any previous
    /// handler for that record's tag.
    pub fn on<T, F>(&mut self, handler: F)
    where
        T: ResponseVariant,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.insert(T::TYPE, Box::new(TypedHandler::new(handler)));
    }
}

impl LocalRegistry {
    /// Register a handler for `response_type`, replacing any previous one.
    pub fn register<F>(&mut self, response_type: ResponseType, handler: F)
    where
        F: Fn(Response) + 'static,
    {
        self.insert(response_type, Box::new(FnHandler::new(handler)));
    }

    /// Register a handler for one record type.
    pub fn on<T, F>(&mut self, handler: F)
    where
        T: ResponseVariant,
        F: Fn(T) + 'static,
    {
        self.insert(T::TYPE, Box::new(TypedHandler::new(handler)));
    }
}

impl<H: ?Sized + LocalHandler> Default for HandlerRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ?Sized + LocalHandler> fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<_> = self.handlers.keys().map(ResponseType::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &tags)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{PromptCloseConfirmationModal, SetCanvasZoom};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn counting_sink() -> (Arc<AtomicUsize>, impl DiagnosticSink) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let sink = move |_: &Diagnostic<'_>| {
            counter.fetch_add(1, Ordering::SeqCst);
        };
        (count, sink)
    }

    #[test]
    fn test_register_and_dispatch() {
        let mut registry = ResponseRegistry::new();
        let zooms = Arc::new(Mutex::new(Vec::new()));
        let seen = zooms.clone();

        registry.on(move |zoom: SetCanvasZoom| seen.lock().unwrap().push(zoom.new_zoom));

        let outcome = registry.dispatch("SetCanvasZoom", &json!({ "new_zoom": 4.0 }));
        assert!(matches!(outcome, Dispatch::Handled(ResponseType::SetCanvasZoom)));
        assert!(outcome.is_handled());
        assert_eq!(*zooms.lock().unwrap(), vec![4.0]);
    }

    #[test]
    fn test_register_untyped() {
        let mut registry = ResponseRegistry::new();
        let received = Arc::new(Mutex::new(None));
        let slot = received.clone();

        registry.register(ResponseType::PromptCloseConfirmationModal, move |r| {
            *slot.lock().unwrap() = Some(r);
        });

        registry.notify("PromptCloseConfirmationModal", &json!(null));
        assert_eq!(
            *received.lock().unwrap(),
            Some(Response::PromptCloseConfirmationModal(
                PromptCloseConfirmationModal
            ))
        );
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = ResponseRegistry::new();
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = first.clone();
        registry.register(ResponseType::DocumentChanged, move |_| {
            f.fetch_add(1, Ordering::SeqCst);
        });
        let s = second.clone();
        registry.register(ResponseType::DocumentChanged, move |_| {
            s.fetch_add(1, Ordering::SeqCst);
        });

        registry.dispatch("DocumentChanged", &json!({}));
        registry.dispatch("DocumentChanged", &json!({}));

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unhandled_reports_once() {
        let (count, sink) = counting_sink();
        let registry = ResponseRegistry::with_sink(sink);

        let outcome = registry.dispatch("SetRotation", &json!({ "new_radians": 1.0 }));

        assert!(matches!(outcome, Dispatch::Unhandled(ResponseType::SetRotation)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unknown_tag_calls_no_handler() {
        let (count, sink) = counting_sink();
        let mut registry = ResponseRegistry::with_sink(sink);
        let calls = Arc::new(AtomicUsize::new(0));

        for response_type in ResponseType::ALL {
            let c = calls.clone();
            registry.register(response_type, move |_| {
                c.fetch_add(1, Ordering::SeqCst);
            });
        }

        let outcome = registry.dispatch("UpdateLayer", &json!({}));

        assert!(matches!(outcome, Dispatch::Rejected(DecodeError::UnknownTag(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_malformed_payload_calls_no_handler() {
        let (count, sink) = counting_sink();
        let mut registry = ResponseRegistry::with_sink(sink);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();

        registry.register(ResponseType::CollapseFolder, move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let outcome = registry.dispatch("CollapseFolder", &json!({ "path": "1/2" }));

        assert!(matches!(outcome, Dispatch::Rejected(DecodeError::InvalidType { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handled_reports_nothing() {
        let (count, sink) = counting_sink();
        let mut registry = ResponseRegistry::with_sink(sink);
        registry.register(ResponseType::NewDocument, |_| {});

        registry.notify("NewDocument", &json!({ "document_name": "a" }));
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_set_sink() {
        let (count, sink) = counting_sink();
        let mut registry = ResponseRegistry::new();
        registry.set_sink(sink);

        registry.notify("SetActiveDocument", &json!({ "document_index": 1 }));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_typed_handler_declines_mismatch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let handler = TypedHandler::new(move |_: SetCanvasZoom| {
            c.fetch_add(1, Ordering::SeqCst);
        });

        let taken = handler.call(Response::PromptCloseConfirmationModal(
            PromptCloseConfirmationModal,
        ));
        assert!(!taken);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(handler.call(SetCanvasZoom { new_zoom: 1.0 }.into()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mismatched_handler_reports_unhandled() {
        let (count, sink) = counting_sink();
        let mut registry = ResponseRegistry::with_sink(sink);
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();

        // Zoom handler filed under the rotation tag
        registry.insert(
            ResponseType::SetRotation,
            Box::new(TypedHandler::new(move |_: SetCanvasZoom| {
                c.fetch_add(1, Ordering::SeqCst);
            })),
        );

        let outcome = registry.dispatch("SetRotation", &json!({ "new_radians": 1.0 }));

        assert!(matches!(outcome, Dispatch::Unhandled(ResponseType::SetRotation)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_local_registry_accepts_rc_state() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let (count, sink) = counting_sink();
        let mut registry = LocalRegistry::with_sink(sink);
        let zooms = Rc::new(RefCell::new(Vec::new()));
        let changes = Rc::new(RefCell::new(0));

        let z = zooms.clone();
        registry.on(move |zoom: SetCanvasZoom| z.borrow_mut().push(zoom.new_zoom));
        let c = changes.clone();
        registry.register(ResponseType::DocumentChanged, move |_| {
            *c.borrow_mut() += 1;
        });

        registry.notify("SetCanvasZoom", &json!({ "SetCanvasZoom": { "new_zoom": 0.5 } }));
        registry.notify("DocumentChanged", &json!(null));
        let outcome = registry.dispatch("SetRotation", &json!({ "new_radians": 1.0 }));

        assert_eq!(*zooms.borrow(), vec![0.5]);
        assert_eq!(*changes.borrow(), 1);
        assert!(matches!(outcome, Dispatch::Unhandled(ResponseType::SetRotation)));
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_is_registered() {
        let mut registry = ResponseRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.is_registered(ResponseType::UpdateCanvas));

        registry.register(ResponseType::UpdateCanvas, |_| {});
        assert!(registry.is_registered(ResponseType::UpdateCanvas));
        assert!(!registry.is_empty());
        assert_eq!(format!("{registry:?}"), "HandlerRegistry { handlers: [\"UpdateCanvas\"], .. }");
    }
}
