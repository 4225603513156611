//! Presence-tracking broadcast hub.
//!
//! Tracks which WebSocket connections have joined the chat under a display
//! name and fans structured events out to every connected client.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
