//! One interactive chat session over one connection.

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::client::{ChatClient, ClientError, ErrorEvent};
use crate::common::time::now_millis;
use crate::protocol::{ErrorKind, EventKind};
use crate::transport::TransportError;

use super::SessionConfig;
use super::command::{Command, parse_line};
use super::error::SessionError;
use super::formatter::MessageFormatter;
use super::ui::{prompt, redisplay_prompt};

/// Why the session ended, as signaled from the dispatch side.
enum SessionEnd {
    /// Normal closure (logout).
    Logout,
    /// The connection dropped with an error.
    ConnectionLost(String),
}

/// Run one chat session: connect, join the configured channel, then shuttle
/// input lines and inbound events until the user quits or the connection
/// ends.
pub async fn run_chat_session(config: &SessionConfig) -> Result<(), SessionError> {
    let mut client = ChatClient::new(&config.host, &config.username).secure(config.secure);

    let (end_tx, mut end_rx) = mpsc::unbounded_channel::<SessionEnd>();

    // Every inbound event and error is printed above a redrawn prompt.
    for kind in EventKind::ALL {
        let username = config.username.clone();
        client.add_event_listener(kind, move |packet: &Value| {
            print!(
                "{}",
                MessageFormatter::format_event(kind, packet, now_millis())
            );
            redisplay_prompt(&username);
        });
    }
    for kind in ErrorKind::ALL {
        let username = config.username.clone();
        client.add_error_handler(kind, move |error: &ErrorEvent| {
            print!("{}", MessageFormatter::format_error(error));
            redisplay_prompt(&username);
        });
    }

    // A normal close ends the session for good; a dropped connection hands
    // control back to the reconnection runner.
    let logout_end = end_tx.clone();
    client.add_event_listener(EventKind::Logout, move |_packet: &Value| {
        let _ = logout_end.send(SessionEnd::Logout);
    });
    let disconnect_end = end_tx;
    client.add_error_handler(ErrorKind::Disconnect, move |error: &ErrorEvent| {
        if let ErrorEvent::Disconnect { code, .. } = error {
            let _ = disconnect_end.send(SessionEnd::ConnectionLost(format!(
                "close code {}",
                code
            )));
        }
    });

    client.connect().await.map_err(|e| match e {
        ClientError::Transport(TransportError::HostResolution(_)) => {
            SessionError::UnknownHost(config.host.clone())
        }
        other => SessionError::ConnectionLost(other.to_string()),
    })?;

    if let Some(channel) = &config.channel {
        if let Err(e) = client.join_text_channel(channel.clone()) {
            tracing::warn!("failed to join '{}': {}", channel, e);
        }
    }

    println!(
        "\nYou are '{}'. Type messages and press Enter to send; /join <channel>, /leave, /quit. Press Ctrl+C to exit.\n",
        config.username
    );

    // rustyline is synchronous; it gets its own thread feeding a channel.
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt_string = prompt(&config.username);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt_string) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    loop {
        tokio::select! {
            line = input_rx.recv() => {
                // None: the readline thread ended (Ctrl+C / Ctrl+D).
                let Some(line) = line else { break };
                match parse_line(&line) {
                    None => {}
                    Some(Command::Say(text)) => {
                        if let Err(e) = client.send_message(text) {
                            tracing::warn!("failed to send message: {}", e);
                        }
                    }
                    Some(Command::Join(channel)) => {
                        match client.join_text_channel(channel.clone()) {
                            Ok(()) => println!("* joining #{}", channel),
                            Err(e) => tracing::warn!("failed to join '{}': {}", channel, e),
                        }
                    }
                    Some(Command::Leave) => {
                        match client.leave_text_channel() {
                            Ok(()) => println!("* leaving the channel"),
                            Err(e) => tracing::warn!("failed to leave: {}", e),
                        }
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Unknown(input)) => {
                        println!("* unrecognized command: {}", input);
                    }
                }
            }
            end = end_rx.recv() => {
                match end {
                    Some(SessionEnd::Logout) | None => {
                        tracing::info!("Session ended by the server");
                        break;
                    }
                    Some(SessionEnd::ConnectionLost(reason)) => {
                        return Err(SessionError::ConnectionLost(reason));
                    }
                }
            }
        }
    }

    Ok(())
}
