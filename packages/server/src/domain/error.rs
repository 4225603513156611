//! ドメイン層のエラー定義

use thiserror::Error;

/// Errors reported by an [`EventBroadcaster`](super::EventBroadcaster) for a single target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BroadcastError {
    /// The target connection is not attached to the broadcaster
    #[error("Connection '{0}' is not attached")]
    ConnectionNotFound(String),

    /// The target's outbound queue is full
    #[error("Outbound queue of connection '{0}' is full")]
    QueueFull(String),

    /// The target's outbound queue has been closed
    #[error("Connection '{0}' is closed")]
    ConnectionClosed(String),

    /// The event could not be encoded for the wire
    #[error("Failed to encode event: {0}")]
    Encode(String),
}

/// Invalid session state transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Connection has already joined as '{0}'")]
    AlreadyJoined(String),

    #[error("Connection is closed")]
    Closed,
}
