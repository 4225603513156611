//! Conversion logic between DTOs and domain types.

use murmur_shared::time::timestamp_to_iso8601;
use thiserror::Error;

use crate::domain::{
    ChatEvent, DisplayName, InboundEvent, MessageText, RegistrySnapshot, Timestamp,
};
use crate::infrastructure::dto::{http, websocket as dto};

/// Errors raised while turning domain values into DTOs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DtoError {
    #[error("Timestamp {0} cannot be represented as RFC 3339")]
    TimestampOutOfRange(i64),
}

fn format_timestamp(timestamp: Timestamp) -> Result<String, DtoError> {
    timestamp_to_iso8601(timestamp.value())
        .ok_or(DtoError::TimestampOutOfRange(timestamp.value()))
}

// ========================================
// DTO → Domain
// ========================================

impl From<dto::InboundEventDto> for InboundEvent {
    fn from(dto: dto::InboundEventDto) -> Self {
        match dto {
            dto::InboundEventDto::Join(payload) => InboundEvent::Join {
                username: DisplayName::from(payload.into_username()),
            },
            dto::InboundEventDto::SendMessage(payload) => InboundEvent::SendMessage {
                message: MessageText::from(payload.message),
            },
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl TryFrom<&ChatEvent> for dto::OutboundEventDto {
    type Error = DtoError;

    fn try_from(event: &ChatEvent) -> Result<Self, Self::Error> {
        let dto = match event {
            ChatEvent::Joined {
                username,
                timestamp,
                user_count,
            } => dto::OutboundEventDto::UserJoined(dto::PresencePayload {
                username: username.as_str().to_string(),
                timestamp: format_timestamp(*timestamp)?,
                user_count: *user_count,
            }),
            ChatEvent::PreviousUsers { names } => dto::OutboundEventDto::PreviousUsers(
                names.iter().map(|n| n.as_str().to_string()).collect(),
            ),
            ChatEvent::Message {
                username,
                message,
                timestamp,
            } => dto::OutboundEventDto::ReceiveMessage(dto::MessagePayload {
                username: username.as_str().to_string(),
                message: message.as_str().to_string(),
                timestamp: format_timestamp(*timestamp)?,
            }),
            ChatEvent::Left {
                username,
                timestamp,
                user_count,
            } => dto::OutboundEventDto::UserLeft(dto::PresencePayload {
                username: username.as_str().to_string(),
                timestamp: format_timestamp(*timestamp)?,
                user_count: *user_count,
            }),
        };
        Ok(dto)
    }
}

impl From<RegistrySnapshot> for http::ParticipantsDto {
    fn from(snapshot: RegistrySnapshot) -> Self {
        Self {
            user_count: snapshot.user_count(),
            participants: snapshot
                .participants
                .into_iter()
                .map(|p| p.display_name.into_string())
                .collect(),
        }
    }
}
