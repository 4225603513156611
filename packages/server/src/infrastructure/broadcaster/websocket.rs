//! WebSocket を使った EventBroadcaster 実装
//!
//! ## 責務
//!
//! - 接続ごとの送信キュー（`mpsc::Sender<String>`）を管理
//! - ドメインイベントを JSON フレームにエンコードして配信（broadcast_all, send_to）
//!
//! ## 設計ノート
//!
//! WebSocket への実際の書き込みは UI 層（`ui/handler/websocket.rs`）の writer タスクが行います。
//! ここではキューへの投入までを担当し、`try_send` を使うため決してブロックしません。
//! キューが満杯または閉じている接続はスキップし、残りへの配信を続けます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{
        BroadcastError, BroadcastReport, ChatEvent, ConnectionId, EventBroadcaster,
        OutboundChannel,
    },
    infrastructure::dto::websocket::OutboundEventDto,
};

/// Encode a domain event as a JSON text frame.
pub fn encode_event(event: &ChatEvent) -> Result<String, BroadcastError> {
    let dto = OutboundEventDto::try_from(event).map_err(|e| BroadcastError::Encode(e.to_string()))?;
    serde_json::to_string(&dto).map_err(|e| BroadcastError::Encode(e.to_string()))
}

/// Push one frame into a connection's queue without waiting.
fn try_push(
    connection_id: &ConnectionId,
    channel: &OutboundChannel,
    frame: String,
) -> Result<(), BroadcastError> {
    channel.try_send(frame).map_err(|e| match e {
        TrySendError::Full(_) => BroadcastError::QueueFull(connection_id.to_string()),
        TrySendError::Closed(_) => BroadcastError::ConnectionClosed(connection_id.to_string()),
    })
}

/// WebSocket を使った EventBroadcaster 実装
#[derive(Default)]
pub struct WebSocketEventBroadcaster {
    /// 接続中のクライアントの送信キュー
    ///
    /// Key: ConnectionId
    /// Value: OutboundChannel
    clients: Mutex<HashMap<ConnectionId, OutboundChannel>>,
}

impl WebSocketEventBroadcaster {
    /// 新しい WebSocketEventBroadcaster を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventBroadcaster for WebSocketEventBroadcaster {
    async fn attach(&self, connection_id: ConnectionId, channel: OutboundChannel) {
        let mut clients = self.clients.lock().await;
        tracing::debug!("Connection '{}' attached to broadcaster", connection_id);
        clients.insert(connection_id, channel);
    }

    async fn detach(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        if clients.remove(connection_id).is_some() {
            tracing::debug!("Connection '{}' detached from broadcaster", connection_id);
        }
    }

    async fn broadcast_all(&self, event: &ChatEvent) -> BroadcastReport {
        let frame = match encode_event(event) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!("Dropping '{}' event: {}", event.name(), e);
                return BroadcastReport::default();
            }
        };

        // 配信対象は map のスナップショット。送信中はロックを保持しない
        let targets: Vec<(ConnectionId, OutboundChannel)> = {
            let clients = self.clients.lock().await;
            clients
                .iter()
                .map(|(id, channel)| (id.clone(), channel.clone()))
                .collect()
        };

        let mut report = BroadcastReport::default();
        for (connection_id, channel) in targets {
            match try_push(&connection_id, &channel, frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    // ブロードキャストでは一部の送信失敗を許容
                    tracing::warn!("Skipping '{}' for a target: {}", event.name(), e);
                    report.failed += 1;
                }
            }
        }

        tracing::debug!(
            "Broadcasted '{}' to {}/{} connections",
            event.name(),
            report.delivered,
            report.targets()
        );
        report
    }

    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), BroadcastError> {
        let frame = encode_event(event)?;
        let channel = {
            let clients = self.clients.lock().await;
            clients
                .get(connection_id)
                .cloned()
                .ok_or_else(|| BroadcastError::ConnectionNotFound(connection_id.to_string()))?
        };
        try_push(connection_id, &channel, frame)?;
        tracing::debug!("Sent '{}' to connection '{}'", event.name(), connection_id);
        Ok(())
    }

    async fn connection_count(&self) -> usize {
        self.clients.lock().await.len()
    }
}
