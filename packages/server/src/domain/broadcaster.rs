//! Event Broadcaster trait 定義
//!
//! ドメインイベントをシリアライズし、接続中のクライアントへ配信するためのインターフェース。
//!
//! ## 配信ポリシー
//!
//! - ベストエフォート: 一部のクライアントへの送信失敗で残りの配信を中断しない
//! - リトライなし
//! - 送信はブロックしない（キューが満杯の場合はそのクライアント分を破棄）

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::BroadcastError, event::ChatEvent, value_object::ConnectionId};

/// Outbound queue of one connection. Carries encoded frames.
pub type OutboundChannel = mpsc::Sender<String>;

/// Result of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Targets whose queue accepted the frame
    pub delivered: usize,
    /// Targets skipped because their queue was full or closed
    pub failed: usize,
}

impl BroadcastReport {
    pub fn targets(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Event Broadcaster trait
///
/// 配信対象は Registry に登録済みの参加者ではなく、トランスポート層が把握している全接続です。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventBroadcaster: Send + Sync {
    /// Make a freshly accepted connection reachable.
    async fn attach(&self, connection_id: ConnectionId, channel: OutboundChannel);

    /// Forget a connection. No-op if it is not attached.
    async fn detach(&self, connection_id: &ConnectionId);

    /// Deliver `event` to every attached connection.
    async fn broadcast_all(&self, event: &ChatEvent) -> BroadcastReport;

    /// Deliver `event` to exactly one connection.
    async fn send_to(
        &self,
        connection_id: &ConnectionId,
        event: &ChatEvent,
    ) -> Result<(), BroadcastError>;

    /// Number of attached connections.
    async fn connection_count(&self) -> usize;
}
