//! Wire protocol definitions for AromaChat.
//!
//! Every frame on the wire is a JSON object with a `type` field naming one of
//! the event kinds; the remaining fields are kind-specific.

mod kind;
mod message;

pub use kind::{ErrorKind, EventKind};
pub use message::{JoinMessage, LeaveMessage, UserMessage};

/// Protocol version sent with the connection handshake.
pub const AROMA_PROTOCOL_VERSION: &str = "0.0.5";

/// Server port for plain-text (`ws://`) connections.
pub const AROMA_PORT: u16 = 1989;

/// Server port for TLS (`wss://`) connections.
pub const AROMA_SECURE_PORT: u16 = 1990;

/// Resource path of the chat endpoint.
pub const AROMA_PATH: &str = "aromachat/chat";

/// WebSocket close code for a normal closure (logout).
pub const NORMAL_CLOSE_CODE: u16 = 1000;
