//! エンティティ定義
//!
//! ツリーストアの論理レイアウトをそのままエンティティとして表現します：
//!
//! ```text
//! rooms/{code}/info    -> RoomInfo { name, created_at }
//! rooms/{code}/fields  -> owner name -> text
//! rooms/{code}/members -> owner name -> Member { name, device_id?, joined_at }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::value_object::{MemberName, RoomCode, RoomName, Timestamp};

/// ルームのメタデータ（作成後は不変）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomInfo {
    pub name: RoomName,
    pub created_at: Timestamp,
}

/// メンバーの在室レコード
///
/// `device_id` は参考情報のみのフィンガープリント。認証には使わない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: MemberName,
    pub device_id: Option<String>,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(name: MemberName, device_id: Option<String>, joined_at: Timestamp) -> Self {
        Self {
            name,
            device_id,
            joined_at,
        }
    }
}

/// フィールド 1 件（スナップショット用の表現）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub owner: MemberName,
    pub text: String,
}

/// ルームエンティティ
///
/// `(room, owner)` ごとにフィールドは常に 1 値のみ。値はメンバーの
/// 「現在のメッセージ全体」であり、追記ログではありません。
///
/// `fields_seq` はフィールドマッピングの変更ごとに増加する通し番号。
/// スナップショット配信の順序判定に使う（受信側は古い番号を破棄する）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub code: RoomCode,
    pub info: RoomInfo,
    pub fields: HashMap<MemberName, String>,
    pub fields_seq: u64,
    pub members: HashMap<MemberName, Member>,
}

impl Room {
    /// 新しい空のルームを作成
    pub fn new(code: RoomCode, name: RoomName, created_at: Timestamp) -> Self {
        Self {
            code,
            info: RoomInfo { name, created_at },
            fields: HashMap::new(),
            fields_seq: 0,
            members: HashMap::new(),
        }
    }

    /// フィールドを無条件に上書きする（マージなし・条件なし）
    ///
    /// 到着順の last-write-wins。既存の値があっても常に置き換える。
    pub fn set_field(&mut self, owner: MemberName, text: String) {
        self.fields.insert(owner, text);
        self.fields_seq += 1;
    }

    /// フィールドを削除する（切断クリーンアップで呼ばれる）
    pub fn delete_field(&mut self, owner: &MemberName) {
        self.fields.remove(owner);
        self.fields_seq += 1;
    }

    /// フィールドの現在値を取得
    pub fn field(&self, owner: &MemberName) -> Option<&str> {
        self.fields.get(owner).map(String::as_str)
    }

    /// メンバーレコードを作成または上書きする
    ///
    /// join のたびに上書きされる。同名での join を拒否しない（設計どおり）。
    pub fn upsert_member(&mut self, member: Member) {
        self.members.insert(member.name.clone(), member);
    }

    /// メンバーレコードを削除する
    pub fn remove_member(&mut self, name: &MemberName) {
        self.members.remove(name);
    }

    /// フィールドを持つメンバー数
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }
}
