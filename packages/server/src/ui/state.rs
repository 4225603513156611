//! Shared application state.

use std::sync::Arc;

use crate::usecase::{ListParticipantsUseCase, SessionLifecycle};

/// Shared application state
pub struct AppState {
    /// Session Lifecycle Controller（接続ごとのイベント振り分け）
    pub lifecycle: Arc<SessionLifecycle>,
    /// ListParticipantsUseCase（参加者一覧取得のユースケース）
    pub list_participants_usecase: Arc<ListParticipantsUseCase>,
    /// Length of each connection's outbound queue
    pub outbound_buffer: usize,
}
