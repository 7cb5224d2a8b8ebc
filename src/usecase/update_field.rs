//! UseCase: フィールド更新
//!
//! Field Store の `set_field` 操作。無条件上書き（マージなし・条件なし）で、
//! サーバ到着順の last-write-wins。更新のたびにルーム全体のフィールド
//! マッピングを通し番号付きスナップショットとして返し、ハンドラがそれを
//! ルーム内の全購読セッション（更新者自身を含む）へ配信する。
//!
//! スナップショットは書き込みと同一のクリティカルセクションで取得される。
//! 並行更新のスナップショットが逆順で配信されても、受信側は `seq` の
//! 古い方を破棄できるため、最終表示が古い状態で止まることはない。

use std::sync::Arc;

use crate::domain::{FieldPusher, FieldsSnapshot, MemberName, RoomCode, RoomRepository};

use super::error::UpdateFieldError;

/// フィールド更新のユースケース
pub struct UpdateFieldUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn FieldPusher>,
}

impl UpdateFieldUseCase {
    /// 新しい UpdateFieldUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn FieldPusher>) -> Self {
        Self { repository, pusher }
    }

    /// フィールド更新を実行
    ///
    /// # Arguments
    ///
    /// * `code` - 対象ルーム
    /// * `owner` - フィールドの所有者（接続時に確定したメンバー名）
    /// * `text` - 新しいメッセージ本文（空文字はクリアを意味する）
    ///
    /// # Returns
    ///
    /// * `Ok(FieldsSnapshot)` - この書き込みを含むルーム全体のスナップショット
    /// * `Err(UpdateFieldError)` - ルーム不在
    pub async fn execute(
        &self,
        code: &RoomCode,
        owner: &MemberName,
        text: String,
    ) -> Result<FieldsSnapshot, UpdateFieldError> {
        let snapshot = self.repository.set_field(code, owner, text).await?;
        Ok(snapshot)
    }

    /// fields-snapshot をルーム内の全購読セッションへブロードキャスト
    ///
    /// 更新者自身も含める。自分のフィールドのサーバ確認済みエコーが
    /// この配信で届く。
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルーム
    /// * `message` - ブロードキャストするメッセージ（直列化済み JSON）
    pub async fn broadcast_snapshot(&self, room: &RoomCode, message: &str) {
        if let Err(e) = self.pusher.broadcast_room(room, message).await {
            tracing::warn!("Failed to broadcast fields-snapshot in '{}': {}", room, e);
        }
    }
}
