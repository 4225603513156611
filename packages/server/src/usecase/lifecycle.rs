//! Session Lifecycle Controller
//!
//! 接続・受信イベント・切断を各ユースケースへ振り分けます。
//! 1 つの接続のイベントは受信順に 1 つずつ処理されます。

use std::sync::Arc;

use murmur_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRegistry, EventBroadcaster, InboundEvent, OutboundChannel, Session,
};

use super::{
    connect::ConnectUseCase,
    disconnect::{DisconnectOutcome, DisconnectUseCase},
    gate::SerialGate,
    join_chat::JoinChatUseCase,
    send_message::SendMessageUseCase,
};

/// Drives one connection through `Connected` -> `Joined` -> `Closed`.
pub struct SessionLifecycle {
    connect_usecase: Arc<ConnectUseCase>,
    join_chat_usecase: Arc<JoinChatUseCase>,
    send_message_usecase: Arc<SendMessageUseCase>,
    disconnect_usecase: Arc<DisconnectUseCase>,
}

impl SessionLifecycle {
    pub fn new(
        connect_usecase: Arc<ConnectUseCase>,
        join_chat_usecase: Arc<JoinChatUseCase>,
        send_message_usecase: Arc<SendMessageUseCase>,
        disconnect_usecase: Arc<DisconnectUseCase>,
    ) -> Self {
        Self {
            connect_usecase,
            join_chat_usecase,
            send_message_usecase,
            disconnect_usecase,
        }
    }

    /// Build every use case around one registry, broadcaster, clock and gate.
    pub fn from_parts(
        registry: Arc<dyn ConnectionRegistry>,
        broadcaster: Arc<dyn EventBroadcaster>,
        clock: Arc<dyn Clock>,
        gate: Arc<SerialGate>,
    ) -> Self {
        Self::new(
            Arc::new(ConnectUseCase::new(broadcaster.clone(), gate.clone())),
            Arc::new(JoinChatUseCase::new(
                registry.clone(),
                broadcaster.clone(),
                clock.clone(),
                gate.clone(),
            )),
            Arc::new(SendMessageUseCase::new(
                registry.clone(),
                broadcaster.clone(),
                clock.clone(),
                gate.clone(),
            )),
            Arc::new(DisconnectUseCase::new(registry, broadcaster, clock, gate)),
        )
    }

    /// Transport connect: the session starts in `Connected`.
    pub async fn on_connect(&self, connection_id: ConnectionId, channel: OutboundChannel) -> Session {
        self.connect_usecase.execute(connection_id, channel).await
    }

    /// Handle one inbound event for `session`.
    pub async fn on_event(&self, session: &mut Session, event: InboundEvent) {
        tracing::debug!("'{}' -> {}", session.id(), event.name());
        match event {
            InboundEvent::Join { username } => {
                self.join_chat_usecase.execute(session, username).await;
            }
            InboundEvent::SendMessage { message } => {
                self.send_message_usecase.execute(session, message).await;
            }
        }
    }

    /// Transport disconnect, from any state.
    pub async fn on_disconnect(&self, mut session: Session) -> DisconnectOutcome {
        self.disconnect_usecase.execute(&mut session).await
    }
}
