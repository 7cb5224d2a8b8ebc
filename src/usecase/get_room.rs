//! UseCase: ルーム取得
//!
//! Room Registry の `get_room` 操作。join 時の検証とメタデータ表示の
//! 両方で使われる単一ポイントルックアップ。

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository};

use super::error::GetRoomError;

/// ルーム取得のユースケース
pub struct GetRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomUseCase {
    /// 新しい GetRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム取得を実行
    ///
    /// # Arguments
    ///
    /// * `code` - ルームコード（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - ルームの現在状態
    /// * `Err(GetRoomError)` - バリデーション失敗またはルーム不在
    pub async fn execute(&self, code: String) -> Result<Room, GetRoomError> {
        let code = RoomCode::new(code)?;
        self.repository
            .get_room(&code)
            .await
            .map_err(|_| GetRoomError::NotFound(code.into_string()))
    }

    /// 全ルームの一覧を取得（デバッグ用ダンプ）
    pub async fn list(&self) -> Vec<Room> {
        self.repository.list_rooms().await
    }
}
