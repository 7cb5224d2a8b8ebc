//! ドメイン層のエラー型定義

use thiserror::Error;

/// 値オブジェクトのバリデーションエラー
///
/// バリデーションはネットワーク呼び出しの前に同期的に行われ、
/// このエラーがそのままユーザーへのインラインメッセージになります。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// ルームコードが空
    #[error("room code must not be empty")]
    EmptyRoomCode,

    /// ルームコードに空白が含まれる
    #[error("room code must not contain whitespace: '{0}'")]
    InvalidRoomCode(String),

    /// ルーム名が空
    #[error("room name must not be empty")]
    EmptyRoomName,

    /// メンバー名が空
    #[error("member name must not be empty")]
    EmptyMemberName,
}

/// Repository 層（ツリーストア）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// ルームコードが既に使用されている（作成の一意性制約違反）
    #[error("room code '{0}' is already taken")]
    CodeTaken(String),

    /// 指定されたルームが存在しない
    #[error("room '{0}' was not found")]
    RoomNotFound(String),
}
