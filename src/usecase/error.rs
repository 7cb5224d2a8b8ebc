//! UseCase 層のエラー型定義

use thiserror::Error;

use crate::domain::{DomainError, RepositoryError};

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    /// 入力バリデーションエラー（ネットワーク呼び出し前に検出）
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// ルームコードが既に使用されている
    #[error("room code '{0}' is already taken")]
    CodeTaken(String),
}

/// ルーム取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomError {
    /// 入力バリデーションエラー
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// ルームが存在しない
    #[error("room '{0}' was not found")]
    NotFound(String),
}

/// join（セッション確立）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinError {
    /// 入力バリデーションエラー
    #[error("{0}")]
    Validation(#[from] DomainError),

    /// ルームが存在しない
    #[error("room '{0}' was not found")]
    RoomNotFound(String),
}

/// フィールド更新のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateFieldError {
    /// ルームが存在しない（join 前に送られた更新など）
    #[error("room '{0}' was not found")]
    RoomNotFound(String),
}

/// セッション終了のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaveError {
    /// ルームが存在しない
    #[error("room '{0}' was not found")]
    RoomNotFound(String),
}

impl From<RepositoryError> for JoinError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(code) | RepositoryError::CodeTaken(code) => {
                Self::RoomNotFound(code)
            }
        }
    }
}

impl From<RepositoryError> for UpdateFieldError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(code) | RepositoryError::CodeTaken(code) => {
                Self::RoomNotFound(code)
            }
        }
    }
}

impl From<RepositoryError> for LeaveError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::RoomNotFound(code) | RepositoryError::CodeTaken(code) => {
                Self::RoomNotFound(code)
            }
        }
    }
}
