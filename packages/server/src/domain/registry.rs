//! Connection Registry trait 定義
//!
//! 「誰がオンラインか」の唯一の情報源。接続 ID から表示名へのマッピングを保持します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::Participant,
    value_object::{ConnectionId, DisplayName, Timestamp},
};

/// Consistent view of the registry at one instant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrySnapshot {
    pub participants: Vec<Participant>,
}

impl RegistrySnapshot {
    pub fn new(participants: Vec<Participant>) -> Self {
        Self { participants }
    }

    /// Number of joined connections.
    pub fn user_count(&self) -> usize {
        self.participants.len()
    }

    /// Every display name, duplicates preserved.
    pub fn names(&self) -> Vec<DisplayName> {
        self.participants
            .iter()
            .map(|p| p.display_name.clone())
            .collect()
    }

    /// Every display name except the one registered under `connection_id`.
    ///
    /// Other connections that share the excluded connection's name are kept.
    pub fn names_except(&self, connection_id: &ConnectionId) -> Vec<DisplayName> {
        self.participants
            .iter()
            .filter(|p| &p.connection_id != connection_id)
            .map(|p| p.display_name.clone())
            .collect()
    }
}

/// Connection Registry trait
///
/// 存在しない ID に対する操作はエラーではなく no-op として扱います。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Insert or overwrite the mapping for `connection_id`.
    async fn register(
        &self,
        connection_id: ConnectionId,
        display_name: DisplayName,
        joined_at: Timestamp,
    );

    /// Remove the mapping if present, returning the removed participant.
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// Display name registered for `connection_id`, if any.
    async fn lookup(&self, connection_id: &ConnectionId) -> Option<DisplayName>;

    /// Current participants in a stable order.
    async fn snapshot(&self) -> RegistrySnapshot;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str, name: &str, joined_at: i64) -> Participant {
        Participant::new(
            ConnectionId::new(id),
            DisplayName::new(name),
            Timestamp::new(joined_at),
        )
    }

    #[test]
    fn test_empty_snapshot() {
        // テスト項目: 空のスナップショットは人数 0、名前なし
        // given (前提条件):
        let snapshot = RegistrySnapshot::default();

        // when (操作):
        let count = snapshot.user_count();
        let names = snapshot.names();

        // then (期待する結果):
        assert_eq!(count, 0);
        assert!(names.is_empty());
    }

    #[test]
    fn test_names_except_excludes_only_given_connection() {
        // テスト項目: 同名の別接続は除外されず、指定した接続のみが除外される
        // given (前提条件):
        let snapshot = RegistrySnapshot::new(vec![
            participant("c1", "Anonymous", 1),
            participant("c2", "Alice", 2),
            participant("c3", "Anonymous", 3),
        ]);

        // when (操作):
        let names = snapshot.names_except(&ConnectionId::new("c3"));

        // then (期待する結果):
        assert_eq!(names.len(), snapshot.user_count() - 1);
        assert_eq!(
            names,
            vec![DisplayName::new("Anonymous"), DisplayName::new("Alice")]
        );
    }

    #[test]
    fn test_names_except_unknown_connection_keeps_everyone() {
        // テスト項目: 登録されていない ID を除外指定しても全員が残る
        // given (前提条件):
        let snapshot = RegistrySnapshot::new(vec![
            participant("c1", "Alice", 1),
            participant("c2", "Bob", 2),
        ]);

        // when (操作):
        let names = snapshot.names_except(&ConnectionId::new("unknown"));

        // then (期待する結果):
        assert_eq!(names.len(), 2);
    }
}
