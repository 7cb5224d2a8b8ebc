//! UseCase: ルーム作成
//!
//! Room Registry の `create_room` 操作。コードの一意性チェックと書き込みは
//! Repository 実装のロック下で単一操作として行われるため、同時作成の
//! 競合では必ず 1 クライアントだけが勝ち、敗者は `CodeTaken` を受け取る。

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{RepositoryError, Room, RoomCode, RoomName, RoomRepository, Timestamp};

use super::error::CreateRoomError;

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// ルーム作成を実行
    ///
    /// # Arguments
    ///
    /// * `code` - 作成者が選んだルームコード（未検証の生文字列）
    /// * `name` - ルームの表示名（未検証の生文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - 作成されたルーム
    /// * `Err(CreateRoomError)` - バリデーション失敗またはコード重複
    pub async fn execute(&self, code: String, name: String) -> Result<Room, CreateRoomError> {
        // 1. 同期バリデーション（ストアへのアクセス前）
        let code = RoomCode::new(code)?;
        let name = RoomName::new(name)?;

        // 2. 一意性チェック込みの書き込み
        let created_at = Timestamp::new(self.clock.now_wib_millis());
        let room = self
            .repository
            .create_room(code, name, created_at)
            .await
            .map_err(|err| match err {
                RepositoryError::CodeTaken(code) => CreateRoomError::CodeTaken(code),
                // 作成は既存ルームの参照を伴わないため、この枝には到達しない
                RepositoryError::RoomNotFound(code) => {
                    unreachable!("create_room returned RoomNotFound for '{}'", code)
                }
            })?;

        tracing::info!("Room '{}' created", room.code);
        Ok(room)
    }
}
