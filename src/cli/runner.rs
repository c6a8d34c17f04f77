//! Client execution with reconnection support.
//!
//! Reconnection is deliberately layered here, outside the [`ChatClient`]
//! contract: the client itself never retries anything.
//!
//! [`ChatClient`]: crate::client::ChatClient

use std::time::Duration;

use super::SessionConfig;
use super::error::SessionError;
use super::session::run_chat_session;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Run the interactive client, reconnecting on lost sessions.
pub async fn run_client(config: SessionConfig) -> Result<(), SessionError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Connecting to '{}' as '{}' (attempt {}/{})",
            config.host,
            config.username,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_chat_session(&config).await {
            Ok(()) => {
                tracing::info!("Client session ended normally");
                break;
            }
            Err(e) => {
                if should_exit_immediately(&e) {
                    tracing::error!("{}", e);
                    return Err(e);
                }

                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Giving up.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }

    Ok(())
}

/// Whether the error makes retrying pointless.
fn should_exit_immediately(error: &SessionError) -> bool {
    matches!(error, SessionError::UnknownHost(_))
}

/// Whether another reconnection attempt should be made.
fn should_attempt_reconnect(error: &SessionError, current_attempt: u32, max_attempts: u32) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_unknown_host() {
        // テスト項目: UnknownHost エラーの場合、即座に終了すべきと判定される
        // given (前提条件):
        let error = SessionError::UnknownHost("nosuchhost".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_connection_lost() {
        // テスト項目: ConnectionLost の場合、即座に終了すべきではないと判定される
        // given (前提条件):
        let error = SessionError::ConnectionLost("close code 1006".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_unknown_host() {
        // テスト項目: UnknownHost エラーの場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = SessionError::UnknownHost("nosuchhost".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_within_limit() {
        // テスト項目: 再接続回数が上限未満の場合、再接続すべきと判定される
        // given (前提条件):
        let error = SessionError::ConnectionLost("close code 1006".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 3, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_attempt_reconnect_at_limit() {
        // テスト項目: 再接続回数が上限に達した場合、再接続すべきではないと判定される
        // given (前提条件):
        let error = SessionError::ConnectionLost("close code 1006".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_one_before_limit() {
        // テスト項目: 上限の 1 回前の再接続試行では再接続すべきと判定される
        // given (前提条件):
        let error = SessionError::ConnectionLost("close code 1006".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 4, 5);

        // then (期待する結果):
        assert!(result);
    }
}
