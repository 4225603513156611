//! WebSocket event frames.
//!
//! Every text frame is a JSON object `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Frames the server sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum OutboundEventDto {
    UserJoined(PresencePayload),
    PreviousUsers(Vec<String>),
    ReceiveMessage(MessagePayload),
    UserLeft(PresencePayload),
}

/// Payload of `user_joined` and `user_left`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresencePayload {
    pub username: String,
    pub timestamp: String,
    pub user_count: usize,
}

/// Payload of `receive_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    pub username: String,
    pub message: String,
    pub timestamp: String,
}

/// Frames a client sends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum InboundEventDto {
    Join(JoinPayload),
    SendMessage(SendMessagePayload),
}

/// Payload of `join`: either the bare name or `{"username": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JoinPayload {
    Name(String),
    Object { username: String },
}

impl JoinPayload {
    pub fn into_username(self) -> String {
        match self {
            JoinPayload::Name(username) | JoinPayload::Object { username } => username,
        }
    }
}

/// Payload of `send_message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendMessagePayload {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_joined_wire_shape() {
        // テスト項目: user_joined は userCount を camelCase で出力する
        // given (前提条件):
        let dto = OutboundEventDto::UserJoined(PresencePayload {
            username: "Alice".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            user_count: 1,
        });

        // when (操作):
        let value = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "user_joined",
                "data": {
                    "username": "Alice",
                    "timestamp": "2023-01-01T00:00:00.000Z",
                    "userCount": 1
                }
            })
        );
    }

    #[test]
    fn test_previous_users_wire_shape() {
        // テスト項目: previous_users は名前の配列をそのまま data に持つ
        // given (前提条件):
        let dto = OutboundEventDto::PreviousUsers(vec!["Alice".to_string(), "Alice".to_string()]);

        // when (操作):
        let value = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"event": "previous_users", "data": ["Alice", "Alice"]})
        );
    }

    #[test]
    fn test_receive_message_wire_shape() {
        // テスト項目: receive_message は username / message / timestamp を持つ
        // given (前提条件):
        let dto = OutboundEventDto::ReceiveMessage(MessagePayload {
            username: "Alice".to_string(),
            message: "hi".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "event": "receive_message",
                "data": {
                    "username": "Alice",
                    "message": "hi",
                    "timestamp": "2023-01-01T00:00:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_parse_join_with_bare_name() {
        // テスト項目: join の data が文字列の場合にパースできる
        // given (前提条件):
        let text = r#"{"event":"join","data":"Alice"}"#;

        // when (操作):
        let dto: InboundEventDto = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            dto,
            InboundEventDto::Join(JoinPayload::Name("Alice".to_string()))
        );
    }

    #[test]
    fn test_parse_join_with_object() {
        // テスト項目: join の data がオブジェクトの場合もパースできる
        // given (前提条件):
        let text = r#"{"event":"join","data":{"username":"Bob"}}"#;

        // when (操作):
        let dto: InboundEventDto = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        match dto {
            InboundEventDto::Join(payload) => assert_eq!(payload.into_username(), "Bob"),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn test_parse_send_message() {
        // テスト項目: send_message の本文が加工されずにパースされる
        // given (前提条件):
        let text = r#"{"event":"send_message","data":{"message":"  <b>hi</b>  "}}"#;

        // when (操作):
        let dto: InboundEventDto = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            dto,
            InboundEventDto::SendMessage(SendMessagePayload {
                message: "  <b>hi</b>  ".to_string()
            })
        );
    }

    #[test]
    fn test_parse_unknown_event_fails() {
        // テスト項目: 未知のイベント名はパースエラーになる
        // given (前提条件):
        let text = r#"{"event":"typing","data":{}}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundEventDto>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_join_as_bare_name() {
        // テスト項目: クライアントが送る join は data に名前の文字列を入れる
        // given (前提条件):
        let dto = InboundEventDto::Join(JoinPayload::Name("Alice".to_string()));

        // when (操作):
        let text = serde_json::to_string(&dto).unwrap();

        // then (期待する結果):
        assert_eq!(text, r#"{"event":"join","data":"Alice"}"#);
    }
}
