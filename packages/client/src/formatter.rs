//! Message formatting utilities for client display.

use murmur_server::infrastructure::dto::websocket::{
    MessagePayload, OutboundEventDto, PresencePayload,
};
use murmur_shared::time::iso8601_to_local_time;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any event received from the hub
    ///
    /// # Arguments
    ///
    /// * `event` - The decoded event
    /// * `own_username` - The local user's display name (to mark own messages)
    pub fn format_event(event: &OutboundEventDto, own_username: &str) -> String {
        match event {
            OutboundEventDto::UserJoined(payload) => Self::format_user_joined(payload),
            OutboundEventDto::PreviousUsers(names) => Self::format_previous_users(names),
            OutboundEventDto::ReceiveMessage(payload) => {
                Self::format_chat_message(payload, own_username)
            }
            OutboundEventDto::UserLeft(payload) => Self::format_user_left(payload),
        }
    }

    /// Format the list of participants present when we joined
    pub fn format_previous_users(names: &[String]) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Already here:\n");

        if names.is_empty() {
            output.push_str("(nobody else yet)\n");
        } else {
            for name in names {
                output.push_str(&format!("  {}\n", name));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a user-joined notification
    pub fn format_user_joined(payload: &PresencePayload) -> String {
        format!(
            "\n+ {} joined the chat at {} ({})\n",
            payload.username,
            iso8601_to_local_time(&payload.timestamp),
            Self::format_user_count(payload.user_count)
        )
    }

    /// Format a user-left notification
    pub fn format_user_left(payload: &PresencePayload) -> String {
        format!(
            "\n- {} left the chat at {} ({})\n",
            payload.username,
            iso8601_to_local_time(&payload.timestamp),
            Self::format_user_count(payload.user_count)
        )
    }

    /// Format a chat message
    pub fn format_chat_message(payload: &MessagePayload, own_username: &str) -> String {
        let me_suffix = if payload.username == own_username {
            " (me)"
        } else {
            ""
        };
        format!(
            "\n[{}] @{}{}: {}\n",
            iso8601_to_local_time(&payload.timestamp),
            payload.username,
            me_suffix,
            payload.message
        )
    }

    /// Format the online counter, e.g. "1 user online" / "3 users online"
    pub fn format_user_count(user_count: usize) -> String {
        let plural = if user_count == 1 { "" } else { "s" };
        format!("{} user{} online", user_count, plural)
    }

    /// Format a frame that could not be decoded
    pub fn format_raw_message(text: &str) -> String {
        format!("\n? {}\n", text)
    }
}
