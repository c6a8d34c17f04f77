//! Interactive AromaChat terminal client.
//!
//! Connects to an AromaChat server, prints inbound chat events, and sends
//! input lines as messages. `/join <channel>`, `/leave` and `/quit` are
//! handled as commands. Automatically reconnects on disconnection (max 5
//! attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin aroma-client -- --username alice
//! cargo run --bin aroma-client -- -u bob -H chat.example.org -c general
//! ```

use clap::Parser;

use aromalib::cli::{SessionConfig, run_client};
use aromalib::common::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "aroma-client")]
#[command(about = "Terminal client for AromaChat servers", long_about = None)]
struct Args {
    /// Username presented to the server
    #[arg(short = 'u', long)]
    username: String,

    /// Server host name or address
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Text channel to join right after connecting
    #[arg(short = 'c', long)]
    channel: Option<String>,

    /// Connect over TLS (wss, port 1990) instead of plain ws (port 1989)
    #[arg(short = 's', long)]
    secure: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let config = SessionConfig {
        host: args.host,
        username: args.username,
        channel: args.channel,
        secure: args.secure,
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
