//! ドメイン層
//!
//! 値オブジェクト、エンティティ、イベント、セッションの状態遷移、
//! および Infrastructure 層が実装する trait（Registry / Broadcaster）を定義します。

pub mod broadcaster;
pub mod entity;
pub mod error;
pub mod event;
pub mod registry;
pub mod session;
pub mod value_object;

pub use broadcaster::{BroadcastReport, EventBroadcaster, OutboundChannel};
pub use entity::Participant;
pub use error::{BroadcastError, SessionError};
pub use event::{ChatEvent, InboundEvent};
pub use registry::{ConnectionRegistry, RegistrySnapshot};
pub use session::{Session, SessionState};
pub use value_object::{ConnectionId, DisplayName, MessageText, Timestamp};

#[cfg(test)]
pub use broadcaster::MockEventBroadcaster;
#[cfg(test)]
pub use registry::MockConnectionRegistry;
