//! AromaChat client: connection lifecycle and event/error dispatch.

mod error;
mod registry;

pub use error::{ClientError, ErrorEvent};
pub use registry::CallbackRegistry;

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::protocol::{
    AROMA_PATH, AROMA_PORT, AROMA_PROTOCOL_VERSION, AROMA_SECURE_PORT, ErrorKind, EventKind,
    JoinMessage, LeaveMessage, NORMAL_CLOSE_CODE, UserMessage,
};
use crate::transport::{
    Transport, TransportError, TransportEvent, TransportSink, WebSocketTransport,
};

/// Registry of event listeners. Listeners receive the decoded frame verbatim.
pub type EventRegistry = CallbackRegistry<EventKind, Value>;

/// Registry of error handlers.
pub type ErrorRegistry = CallbackRegistry<ErrorKind, ErrorEvent>;

/// A client for one AromaChat server.
///
/// The client owns at most one transport connection at a time; `connect`
/// replaces any prior connection handle without closing it. Listener
/// registries are created once per client, pre-seeded for every kind, and
/// only ever appended to.
pub struct ChatClient {
    target_host: String,
    username: String,
    secure: bool,
    transport: Arc<dyn Transport>,
    outbound: Option<TransportSink>,
    current_channel: Option<String>,
    event_listeners: Arc<EventRegistry>,
    error_handlers: Arc<ErrorRegistry>,
}

impl ChatClient {
    /// Create a client for `target_host` with the built-in WebSocket
    /// transport, on the plain-text port. Host and username are not
    /// validated; the server rejects what it does not accept.
    pub fn new(target_host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            target_host: target_host.into(),
            username: username.into(),
            secure: false,
            transport: Arc::new(WebSocketTransport),
            outbound: None,
            current_channel: None,
            event_listeners: Arc::new(EventRegistry::new(&EventKind::ALL)),
            error_handlers: Arc::new(ErrorRegistry::new(&ErrorKind::ALL)),
        }
    }

    /// Use the TLS endpoint (`wss://`, port 1990) instead of the plain one.
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Replace the transport backend. Mainly useful for tests and embedding.
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// The channel most recently joined with [`ChatClient::join_text_channel`],
    /// if any. Purely local bookkeeping; no server acknowledgement is
    /// tracked.
    pub fn current_channel(&self) -> Option<&str> {
        self.current_channel.as_deref()
    }

    /// Connect to the server.
    ///
    /// Opens the transport and spawns the dispatch task that feeds inbound
    /// activity to the registered listeners and handlers. A host-resolution
    /// failure is additionally reported to `unknownhost` handlers, any other
    /// connect failure to `wserror` handlers, before the error is returned.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        let url = self.endpoint_url();
        let (event_tx, mut event_rx) = mpsc::unbounded_channel();

        let sink = match self.transport.open(&url, event_tx).await {
            Ok(sink) => sink,
            Err(e) => {
                let event = match &e {
                    TransportError::HostResolution(_) => ErrorEvent::UnknownHost {
                        host: self.target_host.clone(),
                    },
                    TransportError::Connect(message) => ErrorEvent::Ws {
                        message: message.clone(),
                    },
                };
                self.error_handlers.emit(event.kind(), &event);
                return Err(e.into());
            }
        };

        // Any prior connection handle is replaced, not closed; its pumps wind
        // down once their channels drop.
        self.outbound = Some(sink);

        let event_listeners = self.event_listeners.clone();
        let error_handlers = self.error_handlers.clone();
        tokio::spawn(async move {
            while let Some(event) = event_rx.recv().await {
                dispatch_transport_event(&event_listeners, &error_handlers, event);
            }
        });

        tracing::info!("connected to '{}' as '{}'", self.target_host, self.username);
        Ok(())
    }

    /// Send a chat message to the current channel. Fire-and-forget; no
    /// acknowledgement is awaited.
    pub fn send_message(&self, message: impl Into<String>) -> Result<(), ClientError> {
        self.send_frame(&UserMessage::new(message.into()))
    }

    /// Join a text channel and record it locally. Joining while already in a
    /// channel overwrites the local record without sending a leave.
    pub fn join_text_channel(&mut self, channel: impl Into<String>) -> Result<(), ClientError> {
        let channel = channel.into();
        self.send_frame(&JoinMessage::new(channel.clone()))?;
        self.current_channel = Some(channel);
        Ok(())
    }

    /// Leave the current text channel and clear the local record.
    pub fn leave_text_channel(&mut self) -> Result<(), ClientError> {
        self.send_frame(&LeaveMessage::new())?;
        self.current_channel = None;
        Ok(())
    }

    /// Append an event listener for `kind`. Listeners are invoked in
    /// registration order with the decoded frame.
    pub fn add_event_listener(
        &self,
        kind: EventKind,
        listener: impl Fn(&Value) + Send + Sync + 'static,
    ) {
        self.event_listeners.register(kind, listener);
    }

    /// Append an error handler for `kind`. Handlers are invoked in
    /// registration order.
    pub fn add_error_handler(
        &self,
        kind: ErrorKind,
        handler: impl Fn(&ErrorEvent) + Send + Sync + 'static,
    ) {
        self.error_handlers.register(kind, handler);
    }

    fn send_frame<T: serde::Serialize>(&self, frame: &T) -> Result<(), ClientError> {
        let sink = self.outbound.as_ref().ok_or(ClientError::NotConnected)?;
        let json = serde_json::to_string(frame)?;
        sink.send(json).map_err(|_| ClientError::NotConnected)?;
        Ok(())
    }

    fn endpoint_url(&self) -> String {
        let (scheme, port) = if self.secure {
            ("wss", AROMA_SECURE_PORT)
        } else {
            ("ws", AROMA_PORT)
        };
        format!(
            "{}://{}:{}/{}?username={}&protocol={}",
            scheme, self.target_host, port, AROMA_PATH, self.username, AROMA_PROTOCOL_VERSION
        )
    }
}

/// Route one transport event to the matching registry.
fn dispatch_transport_event(
    event_listeners: &EventRegistry,
    error_handlers: &ErrorRegistry,
    event: TransportEvent,
) {
    match event {
        TransportEvent::Message(text) => dispatch_frame(event_listeners, error_handlers, &text),
        TransportEvent::Error(message) => {
            let error = ErrorEvent::Ws { message };
            error_handlers.emit(error.kind(), &error);
        }
        TransportEvent::Closed { code, reason } => {
            // Exactly one of logout / disconnect per close.
            if code == NORMAL_CLOSE_CODE {
                let close = serde_json::json!({ "code": code, "reason": reason });
                event_listeners.emit(EventKind::Logout, &close);
            } else {
                let error = ErrorEvent::Disconnect { code, reason };
                error_handlers.emit(error.kind(), &error);
            }
        }
    }
}

/// Decode one inbound text frame and dispatch it.
///
/// A frame whose `type` is not a recognized event kind raises `invalidtype`
/// and is not dispatched as an event. A frame that is not JSON at all is
/// logged and dropped; the connection and later frames are unaffected.
fn dispatch_frame(event_listeners: &EventRegistry, error_handlers: &ErrorRegistry, text: &str) {
    let packet: Value = match serde_json::from_str(text) {
        Ok(packet) => packet,
        Err(e) => {
            tracing::error!("dropping undecodable frame: {}", e);
            return;
        }
    };

    let kind = packet
        .get("type")
        .and_then(Value::as_str)
        .and_then(EventKind::from_wire);

    match kind {
        Some(kind) => {
            tracing::debug!("dispatching '{}' event", kind);
            event_listeners.emit(kind, &packet);
        }
        None => {
            tracing::warn!("dropping frame with unrecognized type");
            error_handlers.emit(ErrorKind::InvalidType, &ErrorEvent::InvalidType);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn registries() -> (EventRegistry, ErrorRegistry) {
        (
            EventRegistry::new(&EventKind::ALL),
            ErrorRegistry::new(&ErrorKind::ALL),
        )
    }

    fn counter_for_event(registry: &EventRegistry, kind: EventKind) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_listener = calls.clone();
        registry.register(kind, move |_| {
            calls_in_listener.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    fn counter_for_error(registry: &ErrorRegistry, kind: ErrorKind) -> Arc<AtomicUsize> {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_in_handler = calls.clone();
        registry.register(kind, move |_| {
            calls_in_handler.fetch_add(1, Ordering::SeqCst);
        });
        calls
    }

    #[test]
    fn test_every_event_kind_dispatches_to_its_listener_exactly_once() {
        // テスト項目: 10 種類すべてのイベントが対応するリスナーに 1 回だけ届く
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let counters: Vec<_> = EventKind::ALL
            .iter()
            .map(|kind| (*kind, counter_for_event(&event_listeners, *kind)))
            .collect();

        // when (操作):
        for kind in EventKind::ALL {
            let frame = format!(r#"{{"type":"{}"}}"#, kind.as_str());
            dispatch_frame(&event_listeners, &error_handlers, &frame);
        }

        // then (期待する結果):
        for (kind, calls) in counters {
            assert_eq!(calls.load(Ordering::SeqCst), 1, "kind {}", kind);
        }
    }

    #[test]
    fn test_listener_receives_the_decoded_frame_verbatim() {
        // テスト項目: リスナーにはデコード済みフレームがそのまま渡される
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let received = Arc::new(Mutex::new(None));
        let received_in_listener = received.clone();
        event_listeners.register(EventKind::UserMessage, move |packet: &Value| {
            *received_in_listener.lock().unwrap() = Some(packet.clone());
        });

        // when (操作):
        dispatch_frame(
            &event_listeners,
            &error_handlers,
            r#"{"type":"usermessage","content":"hello","username":"alice"}"#,
        );

        // then (期待する結果):
        let packet = received.lock().unwrap().clone().unwrap();
        assert_eq!(packet["type"], "usermessage");
        assert_eq!(packet["content"], "hello");
        assert_eq!(packet["username"], "alice");
    }

    #[test]
    fn test_unrecognized_type_raises_invalidtype_and_skips_event_dispatch() {
        // テスト項目: 未知の type は invalidtype になり、イベントとして配送されない
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let event_counters: Vec<_> = EventKind::ALL
            .iter()
            .map(|kind| counter_for_event(&event_listeners, *kind))
            .collect();
        let invalid_calls = counter_for_error(&error_handlers, ErrorKind::InvalidType);

        // when (操作):
        dispatch_frame(
            &event_listeners,
            &error_handlers,
            r#"{"type":"shutdown","content":"bye"}"#,
        );

        // then (期待する結果):
        assert_eq!(invalid_calls.load(Ordering::SeqCst), 1);
        for calls in event_counters {
            assert_eq!(calls.load(Ordering::SeqCst), 0);
        }
    }

    #[test]
    fn test_missing_type_field_raises_invalidtype() {
        // テスト項目: type フィールド欠落は invalidtype になる
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let invalid_calls = counter_for_error(&error_handlers, ErrorKind::InvalidType);

        // when (操作):
        dispatch_frame(&event_listeners, &error_handlers, r#"{"content":"hi"}"#);
        dispatch_frame(&event_listeners, &error_handlers, r#"{"type":42}"#);

        // then (期待する結果):
        assert_eq!(invalid_calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_undecodable_frame_is_dropped_without_dispatch() {
        // テスト項目: JSON として壊れたフレームは破棄され、後続フレームに影響しない
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let message_calls = counter_for_event(&event_listeners, EventKind::UserMessage);
        let invalid_calls = counter_for_error(&error_handlers, ErrorKind::InvalidType);

        // when (操作):
        dispatch_frame(&event_listeners, &error_handlers, "{not json");
        dispatch_frame(
            &event_listeners,
            &error_handlers,
            r#"{"type":"usermessage","content":"still alive"}"#,
        );

        // then (期待する結果):
        assert_eq!(invalid_calls.load(Ordering::SeqCst), 0);
        assert_eq!(message_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_normal_close_dispatches_logout_and_not_disconnect() {
        // テスト項目: close code 1000 は logout になり disconnect にならない
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let logout_calls = counter_for_event(&event_listeners, EventKind::Logout);
        let disconnect_calls = counter_for_error(&error_handlers, ErrorKind::Disconnect);

        // when (操作):
        dispatch_transport_event(
            &event_listeners,
            &error_handlers,
            TransportEvent::Closed {
                code: 1000,
                reason: "bye".to_string(),
            },
        );

        // then (期待する結果):
        assert_eq!(logout_calls.load(Ordering::SeqCst), 1);
        assert_eq!(disconnect_calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_abnormal_close_dispatches_disconnect_and_not_logout() {
        // テスト項目: 1000 以外の close code は disconnect になり logout にならない
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let logout_calls = counter_for_event(&event_listeners, EventKind::Logout);
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_in_handler = received.clone();
        error_handlers.register(ErrorKind::Disconnect, move |error: &ErrorEvent| {
            received_in_handler.lock().unwrap().push(error.clone());
        });

        // when (操作):
        for code in [1001u16, 1006, 4000] {
            dispatch_transport_event(
                &event_listeners,
                &error_handlers,
                TransportEvent::Closed {
                    code,
                    reason: String::new(),
                },
            );
        }

        // then (期待する結果):
        assert_eq!(logout_calls.load(Ordering::SeqCst), 0);
        let received = received.lock().unwrap();
        assert_eq!(received.len(), 3);
        assert!(matches!(
            received[0],
            ErrorEvent::Disconnect { code: 1001, .. }
        ));
    }

    #[test]
    fn test_transport_error_dispatches_wserror() {
        // テスト項目: トランスポートエラーは wserror ハンドラに届く
        // given (前提条件):
        let (event_listeners, error_handlers) = registries();
        let received = Arc::new(Mutex::new(None));
        let received_in_handler = received.clone();
        error_handlers.register(ErrorKind::WsError, move |error: &ErrorEvent| {
            *received_in_handler.lock().unwrap() = Some(error.clone());
        });

        // when (操作):
        dispatch_transport_event(
            &event_listeners,
            &error_handlers,
            TransportEvent::Error("socket reset".to_string()),
        );

        // then (期待する結果):
        assert_eq!(
            received.lock().unwrap().clone(),
            Some(ErrorEvent::Ws {
                message: "socket reset".to_string()
            })
        );
    }

    #[test]
    fn test_endpoint_url_plain() {
        // テスト項目: 非セキュア接続の URL が仕様どおりに組み立てられる
        // given (前提条件):
        let client = ChatClient::new("chat.example.org", "alice");

        // when (操作):
        let url = client.endpoint_url();

        // then (期待する結果):
        assert_eq!(
            url,
            "ws://chat.example.org:1989/aromachat/chat?username=alice&protocol=0.0.5"
        );
    }

    #[test]
    fn test_endpoint_url_secure() {
        // テスト項目: セキュア接続の URL が wss と 1990 番ポートになる
        // given (前提条件):
        let client = ChatClient::new("chat.example.org", "alice").secure(true);

        // when (操作):
        let url = client.endpoint_url();

        // then (期待する結果):
        assert_eq!(
            url,
            "wss://chat.example.org:1990/aromachat/chat?username=alice&protocol=0.0.5"
        );
    }

    #[test]
    fn test_send_before_connect_is_not_connected() {
        // テスト項目: connect 前の送信は NotConnected になる
        // given (前提条件):
        let mut client = ChatClient::new("chat.example.org", "alice");

        // when (操作):
        let send_result = client.send_message("hello");
        let join_result = client.join_text_channel("general");
        let leave_result = client.leave_text_channel();

        // then (期待する結果):
        assert!(matches!(send_result, Err(ClientError::NotConnected)));
        assert!(matches!(join_result, Err(ClientError::NotConnected)));
        assert!(matches!(leave_result, Err(ClientError::NotConnected)));
        assert_eq!(client.current_channel(), None);
    }
}
