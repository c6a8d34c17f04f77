//! Error types for the interactive client.

use thiserror::Error;

/// Session-level errors surfaced to the reconnection runner.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The server host could not be resolved; retrying is pointless.
    #[error("unknown host '{0}'")]
    UnknownHost(String),

    /// The connection failed or was lost mid-session.
    #[error("connection lost: {0}")]
    ConnectionLost(String),
}
