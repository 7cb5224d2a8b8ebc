//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The room code does not exist on the server
    #[error("room '{0}' was not found")]
    RoomNotFound(String),

    /// Invalid local input (empty code or name), detected before any network call
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The session state machine rejected a transition
    #[error("invalid session transition: {0}")]
    InvalidTransition(String),

    /// Connection error
    #[error("connection error: {0}")]
    ConnectionError(String),
}
