//! UseCase: トランスポート接続
//!
//! 接続直後はまだ参加していないため、ブロードキャストは行いません。

use std::sync::Arc;

use crate::domain::{ConnectionId, EventBroadcaster, OutboundChannel, Session};

use super::gate::SerialGate;

/// トランスポート接続のユースケース
pub struct ConnectUseCase {
    /// EventBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn EventBroadcaster>,
    gate: Arc<SerialGate>,
}

impl ConnectUseCase {
    /// 新しい ConnectUseCase を作成
    pub fn new(broadcaster: Arc<dyn EventBroadcaster>, gate: Arc<SerialGate>) -> Self {
        Self { broadcaster, gate }
    }

    /// 接続を配信対象に加え、`Connected` 状態のセッションを返す
    pub async fn execute(&self, connection_id: ConnectionId, channel: OutboundChannel) -> Session {
        let _guard = self.gate.enter().await;
        self.broadcaster
            .attach(connection_id.clone(), channel)
            .await;
        let open = self.broadcaster.connection_count().await;
        tracing::info!("Connection '{}' opened ({} open)", connection_id, open);
        Session::new(connection_id)
    }
}
