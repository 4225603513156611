//! Client execution logic with reconnection support.

use std::time::Duration;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use super::{
    error::ClientError,
    session::{connect_and_join, run_client_session},
};

pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Decide whether another attempt is allowed after `failures` consecutive failures.
pub fn should_attempt_reconnect(failures: u32, max_attempts: u32) -> bool {
    failures < max_attempts
}

/// Counts consecutive connection failures.
///
/// The count starts over whenever a connection is established, so the limit
/// applies to one outage rather than to the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    failures: u32,
    max_attempts: u32,
}

impl ReconnectPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            failures: 0,
            max_attempts,
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    /// A connection was established.
    pub fn record_connected(&mut self) {
        self.failures = 0;
    }

    /// A connection attempt failed or an established one was lost.
    ///
    /// Returns `true` if another attempt is allowed.
    pub fn record_failure(&mut self) -> bool {
        self.failures += 1;
        should_attempt_reconnect(self.failures, self.max_attempts)
    }
}

/// Spawn a blocking thread that reads lines with rustyline.
///
/// The returned channel closes when the user presses Ctrl+C or Ctrl+D.
fn spawn_input_thread(username: String) -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", username);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str()).ok();
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}

/// Run the client, re-joining with the same name after a lost connection.
pub async fn run_client(url: String, username: String) -> Result<(), ClientError> {
    let mut input = spawn_input_thread(username.clone());
    let mut policy = ReconnectPolicy::new(MAX_RECONNECT_ATTEMPTS);

    loop {
        tracing::info!(
            "Connecting to {} as '{}' (attempt {}/{})",
            url,
            username,
            policy.failures() + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        let result = match connect_and_join(&url, &username).await {
            Ok(ws_stream) => {
                policy.record_connected();
                run_client_session(ws_stream, &username, &mut input).await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);

                if !policy.record_failure() {
                    return Err(ClientError::ReconnectExhausted(policy.failures()));
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    policy.failures() + 1,
                    MAX_RECONNECT_ATTEMPTS
                );
                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_attempt_reconnect_first_failure() {
        // テスト項目: 初回の失敗後は再接続すべきと判定される
        // given (前提条件):
        let failures = 1;

        // when (操作):
        let result = should_attempt_reconnect(failures, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 失敗回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let failures = MAX_RECONNECT_ATTEMPTS;

        // when (操作):
        let result = should_attempt_reconnect(failures, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_one_before_limit() {
        // テスト項目: 上限の 1 回前までは再接続すべきと判定される
        // given (前提条件):
        let failures = MAX_RECONNECT_ATTEMPTS - 1;

        // when (操作):
        let result = should_attempt_reconnect(failures, MAX_RECONNECT_ATTEMPTS);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_policy_gives_up_after_consecutive_failures() {
        // テスト項目: 接続できないまま失敗が上限に達すると再接続をあきらめる
        // given (前提条件):
        let mut policy = ReconnectPolicy::new(MAX_RECONNECT_ATTEMPTS);

        // when (操作):
        let results: Vec<bool> = (0..MAX_RECONNECT_ATTEMPTS)
            .map(|_| policy.record_failure())
            .collect();

        // then (期待する結果):
        assert_eq!(results.last(), Some(&false));
        assert!(results[..results.len() - 1].iter().all(|allowed| *allowed));
        assert_eq!(policy.failures(), MAX_RECONNECT_ATTEMPTS);
    }

    #[test]
    fn test_policy_resets_after_successful_connection() {
        // テスト項目: 接続に成功すると失敗回数がリセットされ、再び上限まで再接続できる
        // given (前提条件):
        let mut policy = ReconnectPolicy::new(MAX_RECONNECT_ATTEMPTS);
        for _ in 0..MAX_RECONNECT_ATTEMPTS - 1 {
            policy.record_failure();
        }

        // when (操作):
        policy.record_connected();
        let allowed = policy.record_failure();

        // then (期待する結果):
        assert!(allowed);
        assert_eq!(policy.failures(), 1);
    }
}
