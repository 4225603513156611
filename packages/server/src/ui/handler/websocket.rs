//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, InboundEvent, Session},
    infrastructure::dto::websocket::InboundEventDto,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // トランスポート層として接続 ID を払い出す
    let connection_id = ConnectionId::generate();
    tracing::debug!("Upgrading connection '{}'", connection_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives frames from the outbound queue and writes them to the WebSocket.
///
/// The task ends when the queue is closed (the broadcaster detached this
/// connection) or when writing to the socket fails.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if let Err(e) = sender.send(Message::Text(frame.into())).await {
                tracing::debug!("Stopping writer: {}", e);
                break;
            }
        }
        let _ = sender.close().await;
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    let (tx, rx) = mpsc::channel(state.outbound_buffer);
    let mut session = state.lifecycle.on_connect(connection_id, tx).await;
    let mut send_task = pusher_loop(rx, sender);

    // 受信したイベントを到着順に 1 つずつ処理する
    loop {
        tokio::select! {
            frame = receiver.next() => {
                let msg = match frame {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::warn!("WebSocket error on '{}': {}", session.id(), e);
                        break;
                    }
                    None => break,
                };
                if !handle_message(&state, &mut session, msg).await {
                    break;
                }
            }
            _ = &mut send_task => {
                tracing::debug!("Writer for '{}' finished", session.id());
                break;
            }
        }
    }

    send_task.abort();

    let connection_id = session.id().clone();
    let outcome = state.lifecycle.on_disconnect(session).await;
    tracing::debug!("Connection '{}' closed: {:?}", connection_id, outcome);
}

/// Returns `false` when the connection should be closed.
async fn handle_message(state: &AppState, session: &mut Session, msg: Message) -> bool {
    match msg {
        Message::Text(text) => {
            tracing::debug!("Received text from '{}': {}", session.id(), text.as_str());
            match parse_inbound(text.as_str()) {
                Some(event) => state.lifecycle.on_event(session, event).await,
                None => tracing::warn!("Ignoring unrecognized frame from '{}'", session.id()),
            }
            true
        }
        Message::Binary(data) => {
            tracing::warn!(
                "Ignoring binary frame ({} bytes) from '{}'",
                data.len(),
                session.id()
            );
            true
        }
        Message::Ping(_) | Message::Pong(_) => {
            // Ping/pong is handled automatically by the WebSocket protocol
            true
        }
        Message::Close(_) => {
            tracing::info!("Connection '{}' requested close", session.id());
            false
        }
    }
}

fn parse_inbound(text: &str) -> Option<InboundEvent> {
    match serde_json::from_str::<InboundEventDto>(text) {
        Ok(dto) => Some(dto.into()),
        Err(e) => {
            tracing::debug!("Failed to parse frame as an event: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, MessageText};

    #[test]
    fn test_parse_inbound_join() {
        // テスト項目: join フレームが InboundEvent に変換される
        // given (前提条件):
        let text = r#"{"event":"join","data":"Alice"}"#;

        // when (操作):
        let result = parse_inbound(text);

        // then (期待する結果):
        assert_eq!(
            result,
            Some(InboundEvent::Join {
                username: DisplayName::new("Alice")
            })
        );
    }

    #[test]
    fn test_parse_inbound_send_message() {
        // テスト項目: send_message フレームが InboundEvent に変換される
        // given (前提条件):
        let text = r#"{"event":"send_message","data":{"message":"hi"}}"#;

        // when (操作):
        let result = parse_inbound(text);

        // then (期待する結果):
        assert_eq!(
            result,
            Some(InboundEvent::SendMessage {
                message: MessageText::new("hi")
            })
        );
    }

    #[test]
    fn test_parse_inbound_rejects_plain_text() {
        // テスト項目: JSON でないフレームは None になる
        // given (前提条件):
        let text = "hello";

        // when (操作):
        let result = parse_inbound(text);

        // then (期待する結果):
        assert!(result.is_none());
    }
}
