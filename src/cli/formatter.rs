//! Rendering of inbound events and errors for the terminal.
//!
//! Event payloads are opaque to the client core; this display layer extracts
//! the conventional fields best-effort and falls back to placeholders when a
//! server omits them.

use serde_json::Value;

use crate::client::ErrorEvent;
use crate::common::time::clock_time;
use crate::protocol::EventKind;

/// Message formatter for terminal display.
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render one inbound event.
    ///
    /// `received_at_millis` is the local receive time, shown as a clock
    /// prefix on user-originated events.
    pub fn format_event(kind: EventKind, packet: &Value, received_at_millis: i64) -> String {
        let clock = clock_time(received_at_millis);
        match kind {
            EventKind::Establish => "\n* connection established\n".to_string(),
            EventKind::Login => "\n* logged in\n".to_string(),
            EventKind::Logout => {
                let code = packet.get("code").and_then(Value::as_u64);
                match code {
                    Some(code) => format!("\n* logged out (close code {})\n", code),
                    None => "\n* logged out\n".to_string(),
                }
            }
            EventKind::Join => match channel_of(packet) {
                Some(channel) => format!("\n* joined #{}\n", channel),
                None => "\n* joined the channel\n".to_string(),
            },
            EventKind::Leave => "\n* left the channel\n".to_string(),
            EventKind::UserMessage => {
                let content = packet.get("content").and_then(Value::as_str).unwrap_or("");
                format!("\n[{}] <{}> {}\n", clock, sender_of(packet), content)
            }
            EventKind::UserLogin => {
                format!("\n[{}] * {} logged in\n", clock, sender_of(packet))
            }
            EventKind::UserLogout => {
                format!("\n[{}] * {} logged out\n", clock, sender_of(packet))
            }
            EventKind::UserJoin => {
                format!("\n[{}] + {} joined the channel\n", clock, sender_of(packet))
            }
            EventKind::UserLeave => {
                format!("\n[{}] - {} left the channel\n", clock, sender_of(packet))
            }
        }
    }

    /// Render one error event.
    pub fn format_error(error: &ErrorEvent) -> String {
        match error {
            ErrorEvent::Ws { message } => format!("\n! transport error: {}\n", message),
            ErrorEvent::Disconnect { code, reason } => {
                if reason.is_empty() {
                    format!("\n! connection lost (close code {})\n", code)
                } else {
                    format!("\n! connection lost (close code {}): {}\n", code, reason)
                }
            }
            ErrorEvent::InvalidType => "\n! server sent a message of unknown type\n".to_string(),
            ErrorEvent::UnknownHost { host } => format!("\n! unknown host '{}'\n", host),
        }
    }
}

fn sender_of(packet: &Value) -> &str {
    packet
        .get("username")
        .or_else(|| packet.get("user"))
        .and_then(Value::as_str)
        .unwrap_or("someone")
}

fn channel_of(packet: &Value) -> Option<&str> {
    packet.get("channel").and_then(Value::as_str)
}
