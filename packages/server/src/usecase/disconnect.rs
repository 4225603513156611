//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - Registry からの削除と user_left の配信（残りの接続へ）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続の切断
//! - エッジケース：join 前の切断（通知なし）、二重の切断

use std::sync::Arc;

use murmur_shared::time::Clock;

use crate::domain::{
    ChatEvent, ConnectionRegistry, DisplayName, EventBroadcaster, Session, Timestamp,
};

use super::gate::SerialGate;

/// Result of a disconnect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectOutcome {
    /// A joined participant left; `user_left` was broadcast.
    Left {
        username: DisplayName,
        user_count: usize,
    },
    /// The connection never joined (or was already closed); nothing was broadcast.
    Silent,
}

/// 切断のユースケース
pub struct DisconnectUseCase {
    /// ConnectionRegistry（参加者管理の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// EventBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn EventBroadcaster>,
    clock: Arc<dyn Clock>,
    gate: Arc<SerialGate>,
}

impl DisconnectUseCase {
    /// 新しい DisconnectUseCase を作成
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        broadcaster: Arc<dyn EventBroadcaster>,
        clock: Arc<dyn Clock>,
        gate: Arc<SerialGate>,
    ) -> Self {
        Self {
            registry,
            broadcaster,
            clock,
            gate,
        }
    }

    /// 切断を実行
    ///
    /// どの状態からでも `Closed` に遷移します。参加済みだった場合のみ
    /// Registry から削除し、削除後の人数で `user_left` を配信します。
    pub async fn execute(&self, session: &mut Session) -> DisconnectOutcome {
        let _guard = self.gate.enter().await;

        self.broadcaster.detach(session.id()).await;

        let Some(last_known_name) = session.close() else {
            tracing::info!("Connection '{}' closed before joining", session.id());
            return DisconnectOutcome::Silent;
        };

        let username = self
            .registry
            .unregister(session.id())
            .await
            .map(|participant| participant.display_name)
            .unwrap_or(last_known_name);
        let user_count = self.registry.snapshot().await.user_count();
        tracing::info!(
            "'{}' ('{}') left ({} online)",
            username,
            session.id(),
            user_count
        );

        let event = ChatEvent::Left {
            username: username.clone(),
            timestamp: Timestamp::new(self.clock.now_millis()),
            user_count,
        };
        self.broadcaster.broadcast_all(&event).await;

        DisconnectOutcome::Left {
            username,
            user_count,
        }
    }
}
