//! UseCase: セッション終了（切断クリーンアップ）
//!
//! 接続スコープの切断クリーンアップ本体。明示的な離脱でもトランスポート
//! レベルの切断でも、WebSocket ハンドラの teardown 経路から必ず呼ばれる。
//! フィールドとメンバーレコードを削除し、購読を解除し、残りの購読
//! セッションへ通知するためのスナップショットを返す。
//!
//! 同名メンバーが複数接続でフィールドを共有している場合、先に切断した
//! 接続の時点でフィールドは削除される。残った同名セッションの次の更新で
//! フィールドは再生成される（接続スコープ削除の設計どおり）。

use std::sync::Arc;

use crate::domain::{
    ConnectionId, FieldPusher, FieldsSnapshot, MemberName, RoomCode, RoomRepository,
};

use super::error::LeaveError;

/// セッション終了のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn FieldPusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn FieldPusher>) -> Self {
        Self { repository, pusher }
    }

    /// セッション終了を実行
    ///
    /// 購読解除は冪等：既に解除済みの接続を渡しても安全。
    ///
    /// # Arguments
    ///
    /// * `code` - 対象ルーム
    /// * `name` - 切断したセッションのメンバー名
    /// * `connection_id` - 切断した接続の識別子
    ///
    /// # Returns
    ///
    /// * `Ok(FieldsSnapshot)` - 削除後のフィールドスナップショット（残存者への通知用）
    /// * `Err(LeaveError)` - ルーム不在
    pub async fn execute(
        &self,
        code: &RoomCode,
        name: &MemberName,
        connection_id: &ConnectionId,
    ) -> Result<FieldsSnapshot, LeaveError> {
        // 購読解除を最初に行う。以降の削除通知がこの接続へ流れない。
        self.pusher.unregister(connection_id).await;

        // 削除とスナップショット取得は同一クリティカルセクション。
        let snapshot = self.repository.delete_field(code, name).await?;
        self.repository.remove_member(code, name).await?;

        tracing::info!("Member '{}' left room '{}'", name, code);
        Ok(snapshot)
    }

    /// member-left とスナップショットを残りの購読セッションへブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルーム
    /// * `message` - ブロードキャストするメッセージ（直列化済み JSON）
    pub async fn broadcast_left(&self, room: &RoomCode, message: &str) {
        if let Err(e) = self.pusher.broadcast_room(room, message).await {
            tracing::warn!("Failed to broadcast member-left in '{}': {}", room, e);
        }
    }

    /// ルームに残っている購読セッション数を取得
    pub async fn count_remaining_subscribers(&self, room: &RoomCode) -> usize {
        self.pusher.count_room_subscribers(room).await
    }
}
