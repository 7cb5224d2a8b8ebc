//! UseCase: セッション確立（join）
//!
//! Session Binder が `Joining -> Active` に遷移するときのサーバ側処理。
//! 順序が重要：
//!
//! 1. ルームの存在確認
//! 2. 空フィールドの初期書き込み
//! 3. 書き込み完了後に初めて購読（= 切断クリーンアップ）を登録
//! 4. メンバーレコードの書き込み
//!
//! 2 と 3 を逆にすると、初期書き込みの完了前に切断された場合、
//! クリーンアップ未登録のままフィールドが残留する窓が生まれる。

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{
    ConnectionId, FieldPusher, Member, MemberName, PusherChannel, Room, RoomCode, RoomRepository,
    Timestamp,
};

use super::error::JoinError;

/// join 成功時にハンドラへ返す情報
#[derive(Debug, Clone)]
pub struct JoinedSession {
    /// join 完了後のルーム状態（自分の空フィールドとメンバーレコードを含む）
    pub room: Room,
    /// 書き込まれたメンバーレコード
    pub member: Member,
}

/// セッション確立のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn FieldPusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        pusher: Arc<dyn FieldPusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            pusher,
            clock,
        }
    }

    /// join を実行
    ///
    /// 同名メンバーの join を拒否しない：後から来たセッションはメンバー
    /// レコードを上書きし、既存セッションと同じフィールドを共有する。
    ///
    /// # Arguments
    ///
    /// * `code` - ルームコード（未検証の生文字列）
    /// * `name` - 表示名（未検証の生文字列）
    /// * `device_id` - 参考情報のみのデバイスフィンガープリント
    /// * `connection_id` - この接続の識別子
    /// * `sender` - この接続へメッセージを届けるチャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(JoinedSession)` - join 完了後のルーム状態とメンバーレコード
    /// * `Err(JoinError)` - バリデーション失敗またはルーム不在
    pub async fn execute(
        &self,
        code: String,
        name: String,
        device_id: Option<String>,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> Result<JoinedSession, JoinError> {
        // 1. 同期バリデーション（ネットワーク処理の前）
        let code = RoomCode::new(code)?;
        let name = MemberName::new(name)?;

        // 2. ルームの存在確認
        self.repository
            .get_room(&code)
            .await
            .map_err(|_| JoinError::RoomNotFound(code.as_str().to_string()))?;

        // 3. 空フィールドの初期書き込み
        self.repository
            .set_field(&code, &name, String::new())
            .await?;

        // 4. 初期書き込みの完了後に購読を登録する。
        //    この登録が接続スコープの切断クリーンアップを兼ねる。
        self.pusher
            .register(connection_id, code.clone(), name.clone(), sender)
            .await;

        // 5. メンバーレコードの書き込み（join のたびに上書き）
        let joined_at = Timestamp::new(self.clock.now_wib_millis());
        let member = Member::new(name.clone(), device_id, joined_at);
        self.repository.upsert_member(&code, member.clone()).await?;

        // join 完了後の状態をスナップショットとして返す
        let room = self.repository.get_room(&code).await?;
        tracing::info!("Member '{}' joined room '{}'", name, code);

        Ok(JoinedSession { room, member })
    }

    /// member-joined を自分以外のルーム内購読セッションへブロードキャスト
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルーム
    /// * `exclude` - 除外する接続（join した本人）
    /// * `message` - ブロードキャストするメッセージ（直列化済み JSON）
    pub async fn broadcast_joined(&self, room: &RoomCode, exclude: &ConnectionId, message: &str) {
        if let Err(e) = self.pusher.broadcast_room_except(room, exclude, message).await {
            tracing::warn!("Failed to broadcast member-joined in '{}': {}", room, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::time::FixedClock;
    use crate::domain::repository::MockRoomRepository;
    use crate::domain::{DomainError, RoomName};
    use crate::infrastructure::pusher::WebSocketFieldPusher;
    use crate::infrastructure::repository::InMemoryRoomRepository;
    use tokio::sync::mpsc;

    fn create_test_usecase() -> (Arc<InMemoryRoomRepository>, JoinRoomUseCase) {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let usecase = JoinRoomUseCase::new(
            repository.clone(),
            Arc::new(WebSocketFieldPusher::new()),
            Arc::new(FixedClock::new(1672506000000)),
        );
        (repository, usecase)
    }

    async fn create_test_room(repository: &InMemoryRoomRepository) {
        repository
            .create_room(
                RoomCode::new("abc1".to_string()).unwrap(),
                RoomName::new("Test".to_string()).unwrap(),
                Timestamp::new(1000),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_join_writes_empty_field_and_member_record() {
        // テスト項目: join 後、空フィールドとメンバーレコードが書き込まれている
        // given (前提条件):
        let (repository, usecase) = create_test_usecase();
        create_test_room(&repository).await;
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                "abc1".to_string(),
                "alice".to_string(),
                Some("dev-1234".to_string()),
                ConnectionId::generate(),
                tx,
            )
            .await;

        // then (期待する結果):
        let session = result.unwrap();
        let alice = MemberName::new("alice".to_string()).unwrap();
        assert_eq!(session.room.field(&alice), Some(""));
        assert_eq!(session.member.device_id.as_deref(), Some("dev-1234"));
        assert_eq!(session.member.joined_at.value(), 1672506000000);
        assert!(session.room.members.contains_key(&alice));
    }

    #[tokio::test]
    async fn test_join_unknown_room_fails_without_writes() {
        // テスト項目: 存在しないルームへの join は RoomNotFound で失敗し、
        //             フィールドも購読も登録されない
        // given (前提条件):
        let (_, usecase) = create_test_usecase();
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                "nope".to_string(),
                "alice".to_string(),
                None,
                ConnectionId::generate(),
                tx,
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            JoinError::RoomNotFound("nope".to_string())
        );
    }

    #[tokio::test]
    async fn test_join_with_empty_name_fails_validation() {
        // テスト項目: 空の表示名はバリデーションで弾かれる
        // given (前提条件):
        let (repository, usecase) = create_test_usecase();
        create_test_room(&repository).await;
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                "abc1".to_string(),
                " ".to_string(),
                None,
                ConnectionId::generate(),
                tx,
            )
            .await;

        // then (期待する結果):
        assert_eq!(
            result.unwrap_err(),
            JoinError::Validation(DomainError::EmptyMemberName)
        );
    }

    #[tokio::test]
    async fn test_join_with_same_name_shares_the_field() {
        // テスト項目: 同名で 2 回 join してもフィールドは 1 つのまま共有される
        // given (前提条件):
        let (repository, usecase) = create_test_usecase();
        create_test_room(&repository).await;
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        usecase
            .execute(
                "abc1".to_string(),
                "alice".to_string(),
                Some("dev-aaaa".to_string()),
                ConnectionId::generate(),
                tx1,
            )
            .await
            .unwrap();
        let second = usecase
            .execute(
                "abc1".to_string(),
                "alice".to_string(),
                Some("dev-bbbb".to_string()),
                ConnectionId::generate(),
                tx2,
            )
            .await
            .unwrap();

        // then (期待する結果): フィールドは 1 件、メンバーレコードは後勝ち
        assert_eq!(second.room.field_count(), 1);
        let alice = MemberName::new("alice".to_string()).unwrap();
        assert_eq!(
            second.room.members.get(&alice).unwrap().device_id.as_deref(),
            Some("dev-bbbb")
        );
    }

    #[tokio::test]
    async fn test_join_registers_subscription_only_after_field_write() {
        // テスト項目: フィールド書き込みが失敗した場合、購読は登録されない
        // given (前提条件): get_room は成功するが set_field が失敗する Repository
        let mut mock_repository = MockRoomRepository::new();
        mock_repository.expect_get_room().returning(|code| {
            Ok(Room::new(
                code.clone(),
                RoomName::new("Test".to_string()).unwrap(),
                Timestamp::new(1000),
            ))
        });
        mock_repository.expect_set_field().returning(|code, _, _| {
            Err(crate::domain::RepositoryError::RoomNotFound(
                code.as_str().to_string(),
            ))
        });

        let pusher = Arc::new(WebSocketFieldPusher::new());
        let usecase = JoinRoomUseCase::new(
            Arc::new(mock_repository),
            pusher.clone(),
            Arc::new(FixedClock::new(1672506000000)),
        );
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase
            .execute(
                "abc1".to_string(),
                "alice".to_string(),
                None,
                ConnectionId::generate(),
                tx,
            )
            .await;

        // then (期待する結果): join は失敗し、購読者は 0 のまま
        assert!(result.is_err());
        let code = RoomCode::new("abc1".to_string()).unwrap();
        assert_eq!(pusher.count_room_subscribers(&code).await, 0);
    }
}
