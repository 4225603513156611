//! InMemory Connection Registry 実装
//!
//! ドメイン層が定義する ConnectionRegistry trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス終了とともに破棄され、永続化はしません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRegistry, DisplayName, Participant, RegistrySnapshot, Timestamp,
};

/// インメモリ Connection Registry 実装
///
/// スナップショットは参加時刻順（同時刻なら接続 ID 順）に並びます。
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    participants: Mutex<HashMap<ConnectionId, Participant>>,
}

impl InMemoryConnectionRegistry {
    /// 空の InMemoryConnectionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        joined_at: Timestamp,
    ) {
        let mut participants = self.participants.lock().await;
        let participant = Participant::new(connection_id.clone(), display_name, joined_at);
        if let Some(previous) = participants.insert(connection_id, participant) {
            tracing::debug!(
                "Overwrote registry entry '{}' (was '{}')",
                previous.connection_id,
                previous.display_name
            );
        }
    }

    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let mut participants = self.participants.lock().await;
        participants.remove(connection_id)
    }

    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName> {
        let participants = self.participants.lock().await;
        participants
            .get(connection_id)
            .map(|p| p.display_name.clone())
    }

    async fn snapshot(&self) -> RegistrySnapshot {
        let participants = self.participants.lock().await;
        let mut entries: Vec<Participant> = participants.values().cloned().collect();
        entries.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.connection_id.cmp(&b.connection_id))
        });
        RegistrySnapshot::new(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - register / unregister / lookup / snapshot の基本動作
    // - 存在しない ID に対する操作が no-op になること
    //
    // 【なぜこのテストが必要か】
    // - Registry は「誰がオンラインか」の唯一の情報源
    // - userCount と previous_users はスナップショットから計算される
    //
    // 【どのようなシナリオをテストするか】
    // 1. 登録と参照
    // 2. 同じ ID の再登録（上書き）
    // 3. 同じ表示名の複数接続
    // 4. 削除と、存在しない ID の削除
    // 5. スナップショットの順序
    // ========================================

    fn id(value: &str) -> ConnectionId {
        ConnectionId::new(value)
    }

    #[tokio::test]
    async fn test_register_and_lookup() {
        // テスト項目: 登録した表示名を接続 ID で参照できる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();

        // when (操作):
        registry
            .register(id("c1"), DisplayName::new("Alice"), Timestamp::new(1000))
            .await;

        // then (期待する結果):
        assert_eq!(
            registry.lookup(&id("c1")).await,
            Some(DisplayName::new("Alice"))
        );
        assert_eq!(registry.snapshot().await.user_count(), 1);
    }

    #[tokio::test]
    async fn test_lookup_unknown_returns_none() {
        // テスト項目: 未登録の ID を参照すると None が返される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();

        // when (操作):
        let result = registry.lookup(&id("missing")).await;

        // then (期待する結果):
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_register_same_id_overwrites() {
        // テスト項目: 同じ ID で再登録すると上書きされ、人数は増えない
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .register(id("c1"), DisplayName::new("Alice"), Timestamp::new(1000))
            .await;

        // when (操作):
        registry
            .register(id("c1"), DisplayName::new("Alicia"), Timestamp::new(2000))
            .await;

        // then (期待する結果):
        assert_eq!(registry.snapshot().await.user_count(), 1);
        assert_eq!(
            registry.lookup(&id("c1")).await,
            Some(DisplayName::new("Alicia"))
        );
    }

    #[tokio::test]
    async fn test_duplicate_display_names_are_kept() {
        // テスト項目: 異なる接続が同じ表示名で登録でき、スナップショットに両方現れる
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();

        // when (操作):
        registry
            .register(id("c1"), DisplayName::new("Anonymous"), Timestamp::new(1000))
            .await;
        registry
            .register(id("c2"), DisplayName::new("Anonymous"), Timestamp::new(1001))
            .await;

        // then (期待する結果):
        let snapshot = registry.snapshot().await;
        assert_eq!(snapshot.user_count(), 2);
        assert_eq!(
            snapshot.names(),
            vec![DisplayName::new("Anonymous"), DisplayName::new("Anonymous")]
        );
    }

    #[tokio::test]
    async fn test_unregister_removes_entry() {
        // テスト項目: 削除すると参加者が返され、人数が減る
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .register(id("c1"), DisplayName::new("Alice"), Timestamp::new(1000))
            .await;

        // when (操作):
        let removed = registry.unregister(&id("c1")).await;

        // then (期待する結果):
        assert_eq!(
            removed.map(|p| p.display_name),
            Some(DisplayName::new("Alice"))
        );
        assert_eq!(registry.snapshot().await.user_count(), 0);
        assert!(registry.lookup(&id("c1")).await.is_none());
    }

    #[tokio::test]
    async fn test_unregister_unknown_is_noop() {
        // テスト項目: 存在しない ID の削除はエラーにならず、何も起きない（冪等性）
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .register(id("c1"), DisplayName::new("Alice"), Timestamp::new(1000))
            .await;

        // when (操作):
        let first = registry.unregister(&id("missing")).await;
        registry.unregister(&id("c1")).await;
        let second = registry.unregister(&id("c1")).await;

        // then (期待する結果):
        assert!(first.is_none());
        assert!(second.is_none());
        assert_eq!(registry.snapshot().await.user_count(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_is_ordered_by_join_time() {
        // テスト項目: スナップショットは参加時刻順に並ぶ
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::new();
        registry
            .register(id("c3"), DisplayName::new("Charlie"), Timestamp::new(3000))
            .await;
        registry
            .register(id("c1"), DisplayName::new("Alice"), Timestamp::new(1000))
            .await;
        registry
            .register(id("c2"), DisplayName::new("Bob"), Timestamp::new(2000))
            .await;

        // when (操作):
        let snapshot = registry.snapshot().await;

        // then (期待する結果):
        assert_eq!(
            snapshot.names(),
            vec![
                DisplayName::new("Alice"),
                DisplayName::new("Bob"),
                DisplayName::new("Charlie")
            ]
        );
    }
}
