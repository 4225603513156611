//! 接続ごとのセッション状態
//!
//! ```text
//! Connected --join--> Joined --disconnect--> Closed
//!     |                                        ^
//!     +---------------disconnect---------------+
//! ```
//!
//! `Closed` は終端状態で、以降そのセッションからイベントは発生しません。

use super::{
    error::SessionError,
    value_object::{ConnectionId, DisplayName},
};

/// Lifecycle state of a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Transport is up; no display name yet.
    Connected,
    /// Display name declared; visible to presence tracking.
    Joined { display_name: DisplayName },
    /// Transport is gone.
    Closed,
}

/// Per-connection session owned by the connection's handler task.
#[derive(Debug)]
pub struct Session {
    id: ConnectionId,
    state: SessionState,
}

impl Session {
    /// Start a session in the `Connected` state.
    pub fn new(id: ConnectionId) -> Self {
        Self {
            id,
            state: SessionState::Connected,
        }
    }

    pub fn id(&self) -> &ConnectionId {
        &self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected)
    }

    pub fn is_joined(&self) -> bool {
        matches!(self.state, SessionState::Joined { .. })
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Display name, if the session has joined.
    pub fn display_name(&self) -> Option<&DisplayName> {
        match &self.state {
            SessionState::Joined { display_name } => Some(display_name),
            _ => None,
        }
    }

    /// `Connected` -> `Joined`. The display name cannot change afterwards.
    pub fn join(&mut self, display_name: DisplayName) -> Result<(), SessionError> {
        match &self.state {
            SessionState::Connected => {}
            SessionState::Joined {
                display_name: current,
            } => return Err(SessionError::AlreadyJoined(current.as_str().to_string())),
            SessionState::Closed => return Err(SessionError::Closed),
        }
        self.state = SessionState::Joined { display_name };
        Ok(())
    }

    /// Move to `Closed` from any state.
    ///
    /// Returns the display name if the session had joined, `None` otherwise
    /// (including when it was already closed).
    pub fn close(&mut self) -> Option<DisplayName> {
        match std::mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Joined { display_name } => Some(display_name),
            SessionState::Connected | SessionState::Closed => None,
        }
    }
}
