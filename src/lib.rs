//! Client library for the AromaChat WebSocket protocol.
//!
//! The core type is [`ChatClient`]: it owns one transport connection,
//! exchanges JSON-framed messages with an AromaChat server, and redistributes
//! inbound frames to registered event listeners and error handlers. The
//! transport itself sits behind the [`transport::Transport`] trait, with a
//! tokio-tungstenite implementation built in.

pub mod cli;
pub mod client;
pub mod common;
pub mod protocol;
pub mod transport;

pub use client::{ChatClient, ClientError, ErrorEvent};
pub use protocol::{ErrorKind, EventKind};
