//! Client execution logic with reconnection support.

use std::time::Duration;

use super::error::ClientError;
use super::session::run_client_session;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should exit immediately based on the error type.
///
/// Fatal errors (unknown room, invalid local input) cannot be fixed by
/// retrying the same connection.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::RoomNotFound(_)
            | ClientError::InvalidInput(_)
            | ClientError::InvalidTransition(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// Run the WebSocket client with reconnection logic
pub async fn run_client(
    url: String,
    room_code: String,
    member_name: String,
) -> Result<(), ClientError> {
    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} (room '{}', name '{}', attempt {}/{})",
            url,
            room_code,
            member_name,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&url, &room_code, &member_name).await {
            Ok(_) => {
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
                        "Failed to reconnect after {} attempts. Exiting.",
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_exit_immediately_with_room_not_found() {
        // テスト項目: RoomNotFound は即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::RoomNotFound("abc1".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_exit_immediately_with_invalid_input() {
        // テスト項目: InvalidInput は即座に終了すべきと判定される
        // given (前提条件):
        let error = ClientError::InvalidInput("room code must not be empty".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_not_exit_immediately_with_connection_error() {
        // テスト項目: ConnectionError は即時終了の対象ではない
        // given (前提条件):
        let error = ClientError::ConnectionError("connection lost".to_string());

        // when (操作):
        let result = should_exit_immediately(&error);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_attempt_reconnect_with_remaining_attempts() {
        // テスト項目: 試行回数が残っていれば再接続する
        // given (前提条件):
        let error = ClientError::ConnectionError("connection lost".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 2, 5);

        // then (期待する結果):
        assert!(result);
    }

    #[test]
    fn test_should_not_attempt_reconnect_when_attempts_exhausted() {
        // テスト項目: 試行回数を使い切ったら再接続しない
        // given (前提条件):
        let error = ClientError::ConnectionError("connection lost".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 5, 5);

        // then (期待する結果):
        assert!(!result);
    }

    #[test]
    fn test_should_not_attempt_reconnect_for_fatal_error() {
        // テスト項目: 致命的エラーでは試行回数に関わらず再接続しない
        // given (前提条件):
        let error = ClientError::RoomNotFound("abc1".to_string());

        // when (操作):
        let result = should_attempt_reconnect(&error, 0, 5);

        // then (期待する結果):
        assert!(!result);
    }
}
