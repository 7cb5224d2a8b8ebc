//! Pusher trait 定義（購読とファンアウトの抽象化）
//!
//! フィールドストアは変更をルーム内の全購読セッションへ配信します。
//! この trait はその配信先の登録・解除・ブロードキャストを抽象化し、
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::value_object::{MemberName, RoomCode};

/// 購読セッションへメッセージを届けるチャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 接続識別子
///
/// メンバー名とは独立した、接続ごとの一意な ID。同名メンバーの
/// 2 セッションが共存してもそれぞれが配信を受け取れる。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 配信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    /// 一部の購読セッションへ配信できなかった
    #[error("failed to deliver to {0} subscriber(s)")]
    PartialDelivery(usize),
}

/// Field Pusher trait
///
/// 購読の登録は冪等な解除（`unregister`）と対で使う。登録したまま
/// 解除しないと、破棄済みセッションへ配信し続けるリスナーリークになる。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FieldPusher: Send + Sync {
    /// 接続をルームの購読者として登録する
    async fn register(
        &self,
        connection_id: ConnectionId,
        room: RoomCode,
        member: MemberName,
        sender: PusherChannel,
    );

    /// 接続の購読を解除する（冪等）
    async fn unregister(&self, connection_id: &ConnectionId);

    /// ルーム内の全購読セッションへ配信する
    async fn broadcast_room(&self, room: &RoomCode, message: &str) -> Result<(), PushError>;

    /// 指定した接続を除くルーム内の全購読セッションへ配信する
    async fn broadcast_room_except(
        &self,
        room: &RoomCode,
        exclude: &ConnectionId,
        message: &str,
    ) -> Result<(), PushError>;

    /// ルームの購読セッション数を取得する
    async fn count_room_subscribers(&self, room: &RoomCode) -> usize;
}
