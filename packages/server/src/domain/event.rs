//! ドメインイベント
//!
//! サーバーからクライアントへ送る [`ChatEvent`] と、
//! クライアントから受け取る [`InboundEvent`] を定義します。

use super::value_object::{DisplayName, MessageText, Timestamp};

/// Events the hub emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// A connection completed its join. Sent to every connection.
    Joined {
        username: DisplayName,
        timestamp: Timestamp,
        user_count: usize,
    },
    /// Names of the participants already present. Sent to the joiner only.
    PreviousUsers { names: Vec<DisplayName> },
    /// A joined connection sent a chat message. Sent to every connection,
    /// the sender included.
    Message {
        username: DisplayName,
        message: MessageText,
        timestamp: Timestamp,
    },
    /// A joined connection went away. Sent to every remaining connection.
    Left {
        username: DisplayName,
        timestamp: Timestamp,
        user_count: usize,
    },
}

impl ChatEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            ChatEvent::Joined { .. } => "user_joined",
            ChatEvent::PreviousUsers { .. } => "previous_users",
            ChatEvent::Message { .. } => "receive_message",
            ChatEvent::Left { .. } => "user_left",
        }
    }
}

/// Requests a client can send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Join { username: DisplayName },
    SendMessage { message: MessageText },
}

impl InboundEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            InboundEvent::Join { .. } => "join",
            InboundEvent::SendMessage { .. } => "send_message",
        }
    }
}
