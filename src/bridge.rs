//! Dedicated delivery task for embeddings that receive messages on more
//! than one execution context.
//!
//! The task owns the [`ResponseRegistry`] and receives commands over an mpsc
//! channel, so registration and dispatch are serialized without a mutex and
//! messages are handled in the order they were sent.
//!
//! # Architecture
//!
//! ```text
//! Transport thread 1 ─┐
//! Transport thread 2 ─┼─► mpsc::Sender<Command> ─► Delivery Task ─► ResponseRegistry ─► Handler
//! UI setup code      ─┘
//! ```
//!
//! When every [`BridgeHandle`] is dropped the task ends and its
//! `JoinHandle` yields the registry back.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::codec::Payload;
use crate::error::BridgeError;
use crate::handler::{FnHandler, Handler, ResponseRegistry, TypedHandler};
use crate::protocol::{Response, ResponseType, ResponseVariant};

/// Default channel capacity.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Configuration for the delivery task.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Messages that may wait in the channel before senders are held back.
    pub channel_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Work item for the delivery task.
enum Command {
    Notify {
        tag: String,
        payload: Payload,
    },
    Register {
        response_type: ResponseType,
        handler: Box<dyn Handler>,
    },
}

/// Handle for sending messages and registrations to the delivery task.
///
/// This is cheaply cloneable and can be shared across threads and tasks.
#[derive(Clone)]
pub struct BridgeHandle {
    tx: mpsc::Sender<Command>,
}

impl BridgeHandle {
    /// Queue a message, waiting for channel capacity.
    pub async fn notify(
        &self,
        tag: impl Into<String>,
        payload: impl Into<Payload>,
    ) -> Result<(), BridgeError> {
        self.send(Command::Notify {
            tag: tag.into(),
            payload: payload.into(),
        })
        .await
    }

    /// Queue a message without waiting.
    ///
    /// Returns `Err(BridgeError::Full)` immediately if the channel is at capacity.
    pub fn try_notify(
        &self,
        tag: impl Into<String>,
        payload: impl Into<Payload>,
    ) -> Result<(), BridgeError> {
        let command = Command::Notify {
            tag: tag.into(),
            payload: payload.into(),
        };

        self.tx.try_send(command).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => BridgeError::Full,
            mpsc::error::TrySendError::Closed(_) => BridgeError::Closed,
        })
    }

    /// Queue a message from a thread outside the async runtime.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context, like
    /// [`mpsc::Sender::blocking_send`].
    pub fn blocking_notify(
        &self,
        tag: impl Into<String>,
        payload: impl Into<Payload>,
    ) -> Result<(), BridgeError> {
        self.tx
            .blocking_send(Command::Notify {
                tag: tag.into(),
                payload: payload.into(),
            })
            .map_err(|_| BridgeError::Closed)
    }

    /// Register a handler for `response_type`, replacing any previous one.
    ///
    /// Takes effect for every message queued after this call.
    pub async fn register<F>(
        &self,
        response_type: ResponseType,
        handler: F,
    ) -> Result<(), BridgeError>
    where
        F: Fn(Response) + Send + Sync + 'static,
    {
        self.send(Command::Register {
            response_type,
            handler: Box::new(FnHandler::new(handler)),
        })
        .await
    }

    /// Register a handler for one record type.
    pub async fn on<T, F>(&self, handler: F) -> Result<(), BridgeError>
    where
        T: ResponseVariant,
        F: Fn(T) + Send + Sync + 'static,
    {
        self.send(Command::Register {
            response_type: T::TYPE,
            handler: Box::new(TypedHandler::new(handler)),
        })
        .await
    }

    /// Check whether the delivery task has stopped.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn send(&self, command: Command) -> Result<(), BridgeError> {
        self.tx.send(command).await.map_err(|_| BridgeError::Closed)
    }
}

/// Spawn the delivery task and return a handle for sending to it.
///
/// # Returns
///
/// A tuple of `(BridgeHandle, JoinHandle)`. The JoinHandle resolves to the
/// registry once every handle has been dropped.
///
/// # Panics
///
/// Must be called from within a Tokio runtime.
pub fn spawn_bridge_task(
    registry: ResponseRegistry,
    config: BridgeConfig,
) -> (BridgeHandle, JoinHandle<ResponseRegistry>) {
    // tokio rejects zero-capacity channels
    let (tx, rx) = mpsc::channel(config.channel_capacity.max(1));

    let task = tokio::spawn(bridge_loop(rx, registry));

    (BridgeHandle { tx }, task)
}

/// Spawn the delivery task with default configuration.
pub fn spawn_bridge_task_default(
    registry: ResponseRegistry,
) -> (BridgeHandle, JoinHandle<ResponseRegistry>) {
    spawn_bridge_task(registry, BridgeConfig::default())
}

/// Main delivery loop - one command at a time, in arrival order.
async fn bridge_loop(
    mut rx: mpsc::Receiver<Command>,
    mut registry: ResponseRegistry,
) -> ResponseRegistry {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Notify { tag, payload } => match payload.into_value() {
                Ok(value) => {
                    registry.dispatch(&tag, &value);
                }
                Err(error) => {
                    registry.reject(&tag, error);
                }
            },
            Command::Register {
                response_type,
                handler,
            } => registry.insert(response_type, handler),
        }
    }

    tracing::debug!("Delivery channel closed, stopping bridge task");
    registry
}
