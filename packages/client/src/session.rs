//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use murmur_server::infrastructure::dto::websocket::{
    InboundEventDto, JoinPayload, OutboundEventDto, SendMessagePayload,
};

use crate::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Encode the `join` frame for `username`.
pub fn join_frame(username: &str) -> Result<String, ClientError> {
    let dto = InboundEventDto::Join(JoinPayload::Name(username.to_string()));
    Ok(serde_json::to_string(&dto)?)
}

/// Encode a `send_message` frame.
pub fn message_frame(message: String) -> Result<String, ClientError> {
    let dto = InboundEventDto::SendMessage(SendMessagePayload { message });
    Ok(serde_json::to_string(&dto)?)
}

/// Render one text frame from the hub.
fn render_frame(text: &str, username: &str) -> String {
    match serde_json::from_str::<OutboundEventDto>(text) {
        Ok(event) => MessageFormatter::format_event(&event, username),
        Err(_) => MessageFormatter::format_raw_message(text),
    }
}

/// Established connection to the hub.
pub type HubStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connect to the hub and send the `join` frame for `username`.
pub async fn connect_and_join(url: &str, username: &str) -> Result<HubStream, ClientError> {
    let (mut ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat hub!");

    ws_stream
        .send(Message::Text(join_frame(username)?.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    Ok(ws_stream)
}

/// Relay input lines and print events on a joined connection.
///
/// Returns `Ok(())` when the user ends input (Ctrl+C / Ctrl+D), or an error if
/// the connection was lost.
pub async fn run_client_session(
    ws_stream: HubStream,
    username: &str,
    input: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (mut write, mut read) = ws_stream.split();

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        username
    );

    loop {
        tokio::select! {
            incoming = read.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    print!("{}", render_frame(text.as_str(), username));
                    redisplay_prompt(username);
                }
                Some(Ok(Message::Close(_))) | None => {
                    tracing::info!("Server closed the connection");
                    return Err(ClientError::ConnectionError(
                        "Connection closed by server".to_string(),
                    ));
                }
                Some(Err(e)) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    return Err(ClientError::ConnectionError(e.to_string()));
                }
                Some(Ok(_)) => {}
            },
            line = input.recv() => match line {
                Some(line) => {
                    if let Err(e) = write.send(Message::Text(message_frame(line)?.into())).await {
                        tracing::warn!("Failed to send message: {}", e);
                        return Err(ClientError::ConnectionError(e.to_string()));
                    }
                }
                None => {
                    // 入力が終了した（Ctrl+C / Ctrl+D）
                    let _ = write.close().await;
                    return Ok(());
                }
            },
        }
    }
}
