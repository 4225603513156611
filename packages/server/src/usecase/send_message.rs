//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - 送信者名の解決と receive_message の全体配信（送信者自身を含む）
//!
//! ### どのような状況を想定しているか
//! - 正常系：参加済みの接続からの送信
//! - エッジケース：join 前の送信（無視）、Registry に名前がない場合（"Anonymous"）

use std::sync::Arc;

use murmur_shared::time::Clock;

use crate::domain::{
    BroadcastReport, ChatEvent, ConnectionRegistry, DisplayName, EventBroadcaster, MessageText,
    Session, Timestamp,
};

use super::gate::SerialGate;

/// Result of a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Broadcast {
        username: DisplayName,
        report: BroadcastReport,
    },
    /// The session has not joined yet.
    Ignored,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// ConnectionRegistry（参加者管理の抽象化）
    registry: Arc<dyn ConnectionRegistry>,
    /// EventBroadcaster（イベント配信の抽象化）
    broadcaster: Arc<dyn EventBroadcaster>,
    clock: Arc<dyn Clock>,
    gate: Arc<SerialGate>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
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

    /// メッセージ送信を実行
    ///
    /// 本文は受け取ったまま配信します（トリミング・長さ制限・エスケープなし）。
    pub async fn execute(&self, session: &Session, message: MessageText) -> SendOutcome {
        if !session.is_joined() {
            tracing::debug!(
                "Ignoring message from '{}' which has not joined",
                session.id()
            );
            return SendOutcome::Ignored;
        }

        let _guard = self.gate.enter().await;

        let username = self
            .registry
            .lookup(session.id())
            .await
            .unwrap_or_else(DisplayName::anonymous);
        let event = ChatEvent::Message {
            username: username.clone(),
            message,
            timestamp: Timestamp::new(self.clock.now_millis()),
        };
        let report = self.broadcaster.broadcast_all(&event).await;
        tracing::info!(
            "Message from '{}' fanned out to {} connections",
            username,
            report.delivered
        );

        SendOutcome::Broadcast { username, report }
    }
}
