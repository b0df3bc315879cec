//! Fluent setup for a response registry.
//!
//! The [`BridgeBuilder`] collects handlers, the diagnostics sink and the
//! delivery task settings, then either hands back a plain
//! [`ResponseRegistry`] for single-threaded use or spawns the delivery task.
//!
//! # Example
//!
//! ```
//! use response_bridge::BridgeBuilder;
//! use response_bridge::protocol::{ResponseType, SetActiveTool, SetCanvasZoom};
//! use serde_json::json;
//!
//! let registry = BridgeBuilder::new()
//!     .handle(|tool: SetActiveTool| println!("tool: {}", tool.tool_name))
//!     .handle(|zoom: SetCanvasZoom| println!("zoom: {}", zoom.new_zoom))
//!     .handle_response(ResponseType::DocumentChanged, |_| println!("changed"))
//!     .build();
//!
//! registry.notify("SetActiveTool", &json!({ "SetActiveTool": { "tool_name": "Pen" } }));
//! ```

use tokio::task::JoinHandle;

use crate::bridge::{spawn_bridge_task, BridgeConfig, BridgeHandle};
use crate::handler::{DiagnosticSink, ResponseRegistry};
use crate::protocol::{Response, ResponseType, ResponseVariant};

/// Builder for configuring a [`ResponseRegistry`] and its delivery task.
pub struct BridgeBuilder {
    registry: ResponseRegistry,
    config: BridgeConfig,
}

impl BridgeBuilder {
    /// Create a new builder reporting diagnostics through `tracing`.
    pub fn new() -> Self {
        Self {
            registry: ResponseRegistry::new(),
            config: BridgeConfig::default(),
        }
    }

    /// Register a handler for one record type.
    ///
    /// A later handler for the same record replaces this one.
    pub fn handle<T, F>(mut self, handler: F) -> Self
    where
        T: ResponseVariant,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.registry.on(handler);
        self
    }

    /// Register a handler receiving the whole [`Response`] for `response_type`.
    pub fn handle_response<F>(mut self, response_type: ResponseType, handler: F) -> Self
    where
        F: Fn(Response) + Send + Sync + 'static,
    {
        self.registry.register(response_type, handler);
        self
    }

    /// Report undeliverable messages to `sink` instead of `tracing`.
    pub fn sink<S: DiagnosticSink>(mut self, sink: S) -> Self {
        self.registry.set_sink(sink);
        self
    }

    /// Set the delivery channel capacity.
    ///
    /// Only used by [`spawn`](Self::spawn). Default: 1024
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    /// Finish setup and return the registry for direct, synchronous use.
    pub fn build(self) -> ResponseRegistry {
        self.registry
    }

    /// Finish setup and move the registry into a delivery task.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(self) -> (BridgeHandle, JoinHandle<ResponseRegistry>) {
        spawn_bridge_task(self.registry, self.config)
    }
}

impl Default for BridgeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
