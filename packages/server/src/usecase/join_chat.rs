//! UseCase: チャットへの参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() メソッド
//! - Registry への登録、user_joined の全体配信、previous_users の個別送信
//!
//! ### なぜこのテストが必要か
//! - userCount は登録直後の Registry の人数と一致しなければならない
//! - previous_users は参加者自身を含まず、長さは userCount - 1 でなければならない
//!
//! ### どのような状況を想定しているか
//! - 正常系：最初の参加者、既存参加者がいる場合の参加
//! - エッジケース：同じ表示名での参加、二重の join

use std::sync::Arc;

use murmur_shared::time::Clock;

use crate::domain::{
    ChatEvent, ConnectionRegistry, DisplayName, EventBroadcaster, Session, Timestamp,
};

use super::gate::SerialGate;

/// Result of a join request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined {
        user_count: usize,
        previous_users: Vec<DisplayName>,
    },
    /// The session was not in the `Connected` state.
    Ignored,
}

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    /// ConnectionRegistry（参加者管理の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// EventBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn EventBroadcaster>,
    clock: Arc<dyn Clock>,
    gate: Arc<SerialGate>,
}

impl JoinChatUseCase {
    /// 新しい JoinChatUseCase を作成
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

    /// 参加を実行
    ///
    /// 1. セッションを `Joined` に遷移（`Connected` 以外なら無視）
    /// 2. Registry に登録し、登録後のスナップショットを取得
    /// 3. `user_joined` を全接続に配信
    /// 4. 参加者自身を除いた名前一覧を `previous_users` として本人にだけ送信
    pub async fn execute(&self, session: &mut Session, username: DisplayName) -> JoinOutcome {
        if let Err(e) = session.join(username.clone()) {
            tracing::debug!("Ignoring join from '{}': {}", session.id(), e);
            return JoinOutcome::Ignored;
        }

        let _guard = self.gate.enter().await;

        let joined_at = Timestamp::new(self.clock.now_millis());
        self.registry
            .register(session.id().clone(), username.clone(), joined_at)
            .await;
        let snapshot = self.registry.snapshot().await;
        let user_count = snapshot.user_count();
        tracing::info!(
            "'{}' joined as '{}' ({} online)",
            session.id(),
            username,
            user_count
        );

        let joined = ChatEvent::Joined {
            username,
            timestamp: joined_at,
            user_count,
        };
        self.broadcaster.broadcast_all(&joined).await;

        let previous_users = snapshot.names_except(session.id());
        let reply = ChatEvent::PreviousUsers {
            names: previous_users.clone(),
        };
        if let Err(e) = self.broadcaster.send_to(session.id(), &reply).await {
            tracing::warn!("Failed to send previous users to '{}': {}", session.id(), e);
        }

        JoinOutcome::Joined {
            user_count,
            previous_users,
        }
    }
}
