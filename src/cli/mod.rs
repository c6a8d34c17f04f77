//! Interactive terminal client built on the chat library.

mod command;
mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use error::SessionError;
pub use runner::run_client;

/// Connection settings for the interactive client.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Server host name or address.
    pub host: String,
    /// Username presented to the server.
    pub username: String,
    /// Text channel to join right after connecting.
    pub channel: Option<String>,
    /// Connect over TLS (wss, port 1990) instead of plain ws (port 1989).
    pub secure: bool,
}
