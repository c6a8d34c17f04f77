//! Transport seam for the chat client.
//!
//! The client never touches handshakes, framing, or close codes directly; it
//! talks to a [`Transport`], which opens a bidirectional text-message channel
//! and reports inbound activity as [`TransportEvent`]s. The built-in
//! implementation is [`websocket::WebSocketTransport`].

mod websocket;

pub use websocket::WebSocketTransport;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Handle for writing text frames to an open connection.
pub type TransportSink = mpsc::UnboundedSender<String>;

/// Errors raised while opening a connection.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The target host could not be resolved.
    #[error("failed to resolve host '{0}'")]
    HostResolution(String),

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    Connect(String),
}

/// Inbound activity surfaced by an open connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// A complete inbound text frame.
    Message(String),

    /// A transport-level error. The connection usually closes right after.
    Error(String),

    /// The connection closed with the given close code and reason.
    Closed { code: u16, reason: String },
}

/// A bidirectional text-message channel.
///
/// `open` establishes the connection, spawns whatever pump tasks the backend
/// needs, and returns the outbound sink. Inbound frames, errors, and the
/// final close are delivered to `events` in the order they occur; the sender
/// is dropped once the connection is finished.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn open(
        &self,
        url: &str,
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<TransportSink, TransportError>;
}
