//! UseCase: 参加者一覧の取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, RegistrySnapshot};

use super::gate::SerialGate;

/// 参加者一覧取得のユースケース
pub struct ListParticipantsUseCase {
    registry: Arc<dyn ConnectionRegistry>,
    gate: Arc<SerialGate>,
}

impl ListParticipantsUseCase {
    pub fn new(registry: Arc<dyn ConnectionRegistry>, gate: Arc<SerialGate>) -> Self {
        Self { registry, gate }
    }

    /// 他のイベントの処理途中を観測しないよう、ゲート内でスナップショットを取る
    pub async fn execute(&self) -> RegistrySnapshot {
        let _guard = self.gate.enter().await;
        self.registry.snapshot().await
    }
}
