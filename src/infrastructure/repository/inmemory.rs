//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのツリーストアとして使用します。
//!
//! ルーム作成の一意性は Mutex 下での entry 操作で保証します。
//! check-then-create が単一のクリティカルセクションになるため、
//! 同じコードで同時に作成しようとしても必ず 1 クライアントだけが勝ち、
//! 敗者には `CodeTaken` が返ります。

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    FieldsSnapshot, Member, MemberName, RepositoryError, Room, RoomCode, RoomName, RoomRepository,
    Timestamp, snapshot::build_field_list,
};

/// インメモリ Room Repository 実装
///
/// `rooms/{code}` のツリー全体を単一の Mutex で保護します。この Mutex が
/// 到着順 last-write-wins の直列化ポイントになります。
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomCode, Room>>,
}

impl InMemoryRoomRepository {
    /// 空のストアで新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        code: RoomCode,
        name: RoomName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        match rooms.entry(code.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::CodeTaken(code.into_string())),
            Entry::Vacant(entry) => {
                let room = Room::new(code, name, created_at);
                entry.insert(room.clone());
                Ok(room)
            }
        }
    }

    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))
    }

    async fn set_field(
        &self,
        code: &RoomCode,
        owner: &MemberName,
        text: String,
    ) -> Result<FieldsSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;
        // 書き込みとスナップショット取得を同一ロック区間で行う。
        // seq とスナップショットの対応がここで確定する。
        room.set_field(owner.clone(), text);
        Ok(FieldsSnapshot {
            seq: room.fields_seq,
            entries: build_field_list(&room.fields),
        })
    }

    async fn delete_field(
        &self,
        code: &RoomCode,
        owner: &MemberName,
    ) -> Result<FieldsSnapshot, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;
        room.delete_field(owner);
        Ok(FieldsSnapshot {
            seq: room.fields_seq,
            entries: build_field_list(&room.fields),
        })
    }

    async fn upsert_member(&self, code: &RoomCode, member: Member) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;
        room.upsert_member(member);
        Ok(())
    }

    async fn remove_member(
        &self,
        code: &RoomCode,
        name: &MemberName,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RepositoryError::RoomNotFound(code.as_str().to_string()))?;
        room.remove_member(name);
        Ok(())
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }
}
