//! WebSocket transport backed by tokio-tungstenite.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use super::{Transport, TransportError, TransportEvent, TransportSink};

/// Close code reported when the connection drops without a close frame.
const ABNORMAL_CLOSE_CODE: u16 = 1006;

/// Close code reported when a close frame carries no status.
const NO_STATUS_CLOSE_CODE: u16 = 1005;

/// The built-in [`Transport`] implementation.
///
/// One pump task drains the outbound channel into the socket, another maps
/// inbound socket messages onto [`TransportEvent`]s. Ping/pong frames are
/// handled by tungstenite itself; binary frames are not part of the protocol
/// and are dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketTransport;

#[async_trait]
impl Transport for WebSocketTransport {
    async fn open(
        &self,
        url: &str,
        events: mpsc::UnboundedSender<TransportEvent>,
    ) -> Result<TransportSink, TransportError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| classify_connect_error(url, e))?;
        tracing::debug!("connected to {}", url);

        let (mut write, mut read) = ws_stream.split();

        let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();

        // Write pump: ends when the sink is dropped or the socket rejects a
        // frame.
        tokio::spawn(async move {
            while let Some(text) = outbound_rx.recv().await {
                if let Err(e) = write.send(Message::Text(text.into())).await {
                    tracing::warn!("failed to send frame: {}", e);
                    break;
                }
            }
        });

        // Read pump: delivers frames and exactly one Closed event.
        tokio::spawn(async move {
            let mut close_reported = false;

            while let Some(message) = read.next().await {
                match message {
                    Ok(Message::Text(text)) => {
                        if events
                            .send(TransportEvent::Message(text.to_string()))
                            .is_err()
                        {
                            return;
                        }
                    }
                    Ok(Message::Close(frame)) => {
                        let (code, reason) = match frame {
                            Some(frame) => (u16::from(frame.code), frame.reason.to_string()),
                            None => (NO_STATUS_CLOSE_CODE, String::new()),
                        };
                        let _ = events.send(TransportEvent::Closed { code, reason });
                        close_reported = true;
                        break;
                    }
                    Ok(Message::Binary(data)) => {
                        tracing::debug!("dropping {} byte binary frame", data.len());
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let _ = events.send(TransportEvent::Error(e.to_string()));
                        let _ = events.send(TransportEvent::Closed {
                            code: ABNORMAL_CLOSE_CODE,
                            reason: e.to_string(),
                        });
                        close_reported = true;
                        break;
                    }
                }
            }

            if !close_reported {
                let _ = events.send(TransportEvent::Closed {
                    code: ABNORMAL_CLOSE_CODE,
                    reason: String::new(),
                });
            }
        });

        Ok(outbound_tx)
    }
}

fn classify_connect_error(url: &str, error: tungstenite::Error) -> TransportError {
    match &error {
        tungstenite::Error::Io(io_error) if is_resolution_failure(io_error) => {
            TransportError::HostResolution(url.to_string())
        }
        _ => TransportError::Connect(error.to_string()),
    }
}

fn is_resolution_failure(error: &std::io::Error) -> bool {
    // getaddrinfo failures surface as uncategorized io errors; the message is
    // the only stable discriminator.
    error.kind() == std::io::ErrorKind::NotFound
        || error.to_string().contains("failed to lookup address")
}
