//! イベント配信の実装
//!
//! - `websocket`: 接続ごとの送信キュー（WebSocket の writer タスクが消費）を使った実装

pub mod websocket;

pub use websocket::{WebSocketEventBroadcaster, encode_event};
