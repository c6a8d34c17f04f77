//! Outbound message DTOs.
//!
//! Each message carries its kind in the `type` field so the serialized form
//! matches the wire format expected by the server.

use serde::{Deserialize, Serialize};

use super::EventKind;

/// A chat message sent to the current channel.
///
/// Wire form: `{"type":"usermessage","content":"..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMessage {
    pub r#type: EventKind,
    pub content: String,
}

impl UserMessage {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            r#type: EventKind::UserMessage,
            content: content.into(),
        }
    }
}

/// A request to join a text channel.
///
/// Wire form: `{"type":"join","channel":"..."}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinMessage {
    pub r#type: EventKind,
    pub channel: String,
}

impl JoinMessage {
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            r#type: EventKind::Join,
            channel: channel.into(),
        }
    }
}

/// A request to leave the current text channel.
///
/// Wire form: `{"type":"leave"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveMessage {
    pub r#type: EventKind,
}

impl LeaveMessage {
    pub fn new() -> Self {
        Self {
            r#type: EventKind::Leave,
        }
    }
}

impl Default for LeaveMessage {
    fn default() -> Self {
        Self::new()
    }
}
