//! Per-connection WebSocket lifecycle.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::state::AppState;
use crate::websocket::broadcast::{SUBSCRIBER_BUFFER, Subscriber};

/// Frames a viewer may send. Anything else is ignored.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum ClientFrame {
    /// Bind to one session's events, or go global when `sessionId` is
    /// absent or null.
    #[serde(rename_all = "camelCase")]
    Subscribe { session_id: Option<String> },
}

/// `GET /ws`: upgrade and hand the socket to [`handle_socket`].
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one viewer connection until it closes or is evicted.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::channel::<Arc<String>>(SUBSCRIBER_BUFFER);

    let subscriber_id = bingo_core::ids::token(12);
    let subscriber = Arc::new(Subscriber::new(subscriber_id.clone(), tx));
    state.hub.register(Arc::clone(&subscriber)).await;
    info!(subscriber_id = %subscriber_id, "viewer connected");

    // Writer task: forward buffered notifications to the socket. The hub
    // closes the channel on eviction, so `recv` returning `None` means
    // this viewer was disconnected server-side and the socket must go.
    let mut writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_tx.send(Message::Text(msg.as_str().into())).await.is_err() {
                return;
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    // Read loop: only subscribe frames carry meaning. A finished writer
    // (eviction or write failure) tears the whole connection down.
    loop {
        let result = tokio::select! {
            _ = &mut writer => break,
            incoming = ws_rx.next() => match incoming {
                Some(result) => result,
                None => break,
            },
        };
        let msg = match result {
            Ok(msg) => msg,
            Err(e) => {
                debug!(subscriber_id = %subscriber_id, error = %e, "socket read error");
                break;
            }
        };
        match msg {
            Message::Text(text) => match serde_json::from_str::<ClientFrame>(&text) {
                Ok(ClientFrame::Subscribe { session_id }) => match session_id {
                    Some(sid) => {
                        subscriber.bind_session(&sid);
                        debug!(subscriber_id = %subscriber_id, session_id = %sid, "viewer subscribed");
                    }
                    None => {
                        subscriber.bind_global();
                        debug!(subscriber_id = %subscriber_id, "viewer subscribed globally");
                    }
                },
                Err(e) => {
                    warn!(subscriber_id = %subscriber_id, error = %e, "unrecognized frame ignored");
                }
            },
            Message::Close(_) => break,
            // Pings are answered by axum; other frame types carry nothing.
            _ => {}
        }
    }

    state.hub.unregister(&subscriber_id).await;
    writer.abort();
    info!(subscriber_id = %subscriber_id, "viewer disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_frame_with_session() {
        let frame: ClientFrame =
            serde_json::from_str(r#"{"type":"subscribe","sessionId":"abc"}"#).unwrap();
        let ClientFrame::Subscribe { session_id } = frame;
        assert_eq!(session_id.as_deref(), Some("abc"));
    }

    #[test]
    fn subscribe_frame_without_session_is_global() {
        let frame: ClientFrame = serde_json::from_str(r#"{"type":"subscribe"}"#).unwrap();
        let ClientFrame::Subscribe { session_id } = frame;
        assert!(session_id.is_none());
    }

    #[test]
    fn unknown_frame_type_fails_to_parse() {
        assert!(serde_json::from_str::<ClientFrame>(r#"{"type":"shout"}"#).is_err());
    }
}
