//! WebSocket 向け FieldPusher 実装
//!
//! 接続ごとの unbounded channel へ JSON 文字列を流し込むだけの薄い実装。
//! チャンネルの受信側は WebSocket ハンドラの送信タスクが持ち、接続が
//! 落ちると send が失敗します。失敗した接続は配信対象から外れるだけで、
//! 登録解除はハンドラの teardown 経路が担当します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, FieldPusher, MemberName, PushError, PusherChannel, RoomCode,
};

/// 購読中の接続 1 件分の情報
struct SubscriberHandle {
    room: RoomCode,
    member: MemberName,
    sender: PusherChannel,
}

/// WebSocket ベースの FieldPusher 実装
pub struct WebSocketFieldPusher {
    connections: Mutex<HashMap<ConnectionId, SubscriberHandle>>,
}

impl WebSocketFieldPusher {
    /// 空の購読テーブルで新しい WebSocketFieldPusher を作成
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for WebSocketFieldPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FieldPusher for WebSocketFieldPusher {
    async fn register(
        &self,
        connection_id: ConnectionId,
        room: RoomCode,
        member: MemberName,
        sender: PusherChannel,
    ) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            connection_id,
            SubscriberHandle {
                room,
                member,
                sender,
            },
        );
    }

    async fn unregister(&self, connection_id: &ConnectionId) {
        let mut connections = self.connections.lock().await;
        if connections.remove(connection_id).is_none() {
            tracing::debug!(
                "Unregister for unknown connection '{}' (already removed)",
                connection_id
            );
        }
    }

    async fn broadcast_room(&self, room: &RoomCode, message: &str) -> Result<(), PushError> {
        let connections = self.connections.lock().await;
        let mut failed = 0;
        for (connection_id, handle) in connections.iter() {
            if &handle.room != room {
                continue;
            }
            if handle.sender.send(message.to_string()).is_err() {
                tracing::warn!(
                    "Failed to deliver to member '{}' (connection '{}')",
                    handle.member,
                    connection_id
                );
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(PushError::PartialDelivery(failed));
        }
        Ok(())
    }

    async fn broadcast_room_except(
        &self,
        room: &RoomCode,
        exclude: &ConnectionId,
        message: &str,
    ) -> Result<(), PushError> {
        let connections = self.connections.lock().await;
        let mut failed = 0;
        for (connection_id, handle) in connections.iter() {
            if &handle.room != room || connection_id == exclude {
                continue;
            }
            if handle.sender.send(message.to_string()).is_err() {
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(PushError::PartialDelivery(failed));
        }
        Ok(())
    }

    async fn count_room_subscribers(&self, room: &RoomCode) -> usize {
        let connections = self.connections.lock().await;
        connections
            .values()
            .filter(|handle| &handle.room == room)
            .count()
    }
}
