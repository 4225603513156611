//! Server configuration.

use std::fmt;

/// Default port, matching the `PORT || 4000` convention.
pub const DEFAULT_PORT: u16 = 4000;
/// Default per-connection outbound queue length (frames).
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;
/// Default browser origin allowed to call the HTTP API.
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Runtime configuration of the hub server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Frames a slow client may fall behind before new events to it are dropped.
    pub outbound_buffer: usize,
    /// Browser origin allowed by CORS.
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, outbound_buffer: usize) -> Self {
        Self {
            host: host.into(),
            port,
            // mpsc::channel panics on a zero capacity
            outbound_buffer: outbound_buffer.max(1),
            cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("127.0.0.1", DEFAULT_PORT, DEFAULT_OUTBOUND_BUFFER)
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (outbound buffer: {} frames, CORS origin: {})",
            self.bind_addr(),
            self.outbound_buffer,
            self.cors_origin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        // テスト項目: デフォルト設定は 127.0.0.1:4000
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::default();

        // then (期待する結果):
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
        assert_eq!(config.outbound_buffer, DEFAULT_OUTBOUND_BUFFER);
        assert_eq!(config.cors_origin, "http://localhost:3000");
    }

    #[test]
    fn test_zero_outbound_buffer_is_clamped() {
        // テスト項目: 送信キュー長 0 は 1 に補正される
        // given (前提条件):

        // when (操作):
        let config = ServerConfig::new("0.0.0.0", 8080, 0);

        // then (期待する結果):
        assert_eq!(config.outbound_buffer, 1);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_cors_origin_override() {
        // テスト項目: CORS で許可するオリジンを上書きできる
        // given (前提条件):
        let config = ServerConfig::default();

        // when (操作):
        let config = config.with_cors_origin("https://chat.example.com");

        // then (期待する結果):
        assert_eq!(config.cors_origin, "https://chat.example.com");
        assert_eq!(config.bind_addr(), "127.0.0.1:4000");
    }
}
