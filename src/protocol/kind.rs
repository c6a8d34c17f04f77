//! Closed enumerations of the message and error categories exchanged with an
//! AromaChat server.

use serde::{Deserialize, Serialize};

/// Recognized inbound and outbound message kinds.
///
/// The wire name of each kind is its all-lowercase form (e.g.
/// [`EventKind::UserMessage`] is `"usermessage"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Connection to the server established.
    Establish,
    /// Own login acknowledged by the server.
    Login,
    /// Own logout (connection closed with the normal close code).
    Logout,
    /// Own channel join acknowledged by the server.
    Join,
    /// Own channel leave acknowledged by the server.
    Leave,
    /// Chat message from a user.
    UserMessage,
    /// Another user logged in.
    UserLogin,
    /// Another user logged out.
    UserLogout,
    /// Another user joined the channel.
    UserJoin,
    /// Another user left the channel.
    UserLeave,
}

impl EventKind {
    /// All event kinds, in protocol declaration order.
    pub const ALL: [EventKind; 10] = [
        EventKind::Establish,
        EventKind::Login,
        EventKind::Logout,
        EventKind::Join,
        EventKind::Leave,
        EventKind::UserMessage,
        EventKind::UserLogin,
        EventKind::UserLogout,
        EventKind::UserJoin,
        EventKind::UserLeave,
    ];

    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Establish => "establish",
            EventKind::Login => "login",
            EventKind::Logout => "logout",
            EventKind::Join => "join",
            EventKind::Leave => "leave",
            EventKind::UserMessage => "usermessage",
            EventKind::UserLogin => "userlogin",
            EventKind::UserLogout => "userlogout",
            EventKind::UserJoin => "userjoin",
            EventKind::UserLeave => "userleave",
        }
    }

    /// Look up a kind by its wire name. Returns `None` for anything that is
    /// not one of the ten recognized kinds.
    pub fn from_wire(name: &str) -> Option<EventKind> {
        EventKind::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recognized error categories surfaced to error handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    /// Transport-level error signaled by the connection.
    WsError,
    /// Connection closed with a non-normal close code.
    Disconnect,
    /// Inbound message whose `type` is not a recognized event kind.
    InvalidType,
    /// Target host could not be resolved.
    UnknownHost,
}

impl ErrorKind {
    /// All error kinds, in protocol declaration order.
    pub const ALL: [ErrorKind; 4] = [
        ErrorKind::WsError,
        ErrorKind::Disconnect,
        ErrorKind::InvalidType,
        ErrorKind::UnknownHost,
    ];

    /// The wire name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::WsError => "wserror",
            ErrorKind::Disconnect => "disconnect",
            ErrorKind::InvalidType => "invalidtype",
            ErrorKind::UnknownHost => "unknownhost",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
