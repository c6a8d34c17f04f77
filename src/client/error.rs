//! Error types for the chat client.

use thiserror::Error;

use crate::protocol::ErrorKind;
use crate::transport::TransportError;

/// Client-specific errors returned by fallible operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An operation that needs a connection was called without one.
    #[error("client is not connected")]
    NotConnected,

    /// An outbound frame could not be encoded.
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),

    /// The transport failed to open a connection.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Payload delivered to error handlers, one variant per [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorEvent {
    /// Transport-level error, forwarded verbatim.
    Ws { message: String },

    /// Connection closed with a non-normal close code.
    Disconnect { code: u16, reason: String },

    /// Inbound frame whose `type` is not a recognized event kind. Carries no
    /// further payload.
    InvalidType,

    /// Target host could not be resolved.
    UnknownHost { host: String },
}

impl ErrorEvent {
    /// The registry kind this payload is dispatched under.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorEvent::Ws { .. } => ErrorKind::WsError,
            ErrorEvent::Disconnect { .. } => ErrorKind::Disconnect,
            ErrorEvent::InvalidType => ErrorKind::InvalidType,
            ErrorEvent::UnknownHost { .. } => ErrorKind::UnknownHost,
        }
    }
}
