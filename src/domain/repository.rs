//! Repository trait 定義
//!
//! ドメイン層が必要とするツリーストアへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 依存性の逆転（DIP）
//!
//! - ドメイン層が必要とするインターフェースをドメイン層自身が定義
//! - Infrastructure 層がドメイン層のインターフェースに依存
//! - ドメイン層は Infrastructure 層に依存しない

use async_trait::async_trait;

use super::entity::{Member, Room};
use super::error::RepositoryError;
use super::snapshot::FieldsSnapshot;
use super::value_object::{MemberName, RoomCode, RoomName, Timestamp};

/// Room Repository trait
///
/// ツリーストア `rooms/{code}/...` への操作。UseCase 層はこの trait に
/// 依存し、Infrastructure 層の具体的な実装には依存しない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを作成する
    ///
    /// コードの存在チェックと書き込みはストアのロック下で単一操作として
    /// 行われる（check-then-create の競合で必ず 1 クライアントだけが勝つ）。
    async fn create_room(
        &self,
        code: RoomCode,
        name: RoomName,
        created_at: Timestamp,
    ) -> Result<Room, RepositoryError>;

    /// ルームを取得する（join 時の検証とメタデータ表示の両方で使用）
    async fn get_room(&self, code: &RoomCode) -> Result<Room, RepositoryError>;

    /// フィールドを無条件に上書きし、書き込み後のスナップショットを返す
    ///
    /// 書き込みとスナップショット取得はストアのロック下で単一操作として
    /// 行われる。返される `seq` はこの書き込みを含む状態の通し番号であり、
    /// 並行更新どうしの新旧判定に使える。
    async fn set_field(
        &self,
        code: &RoomCode,
        owner: &MemberName,
        text: String,
    ) -> Result<FieldsSnapshot, RepositoryError>;

    /// フィールドを削除し、削除後のスナップショットを返す（切断クリーンアップ）
    ///
    /// `set_field` と同じく削除とスナップショット取得は単一操作。
    async fn delete_field(
        &self,
        code: &RoomCode,
        owner: &MemberName,
    ) -> Result<FieldsSnapshot, RepositoryError>;

    /// メンバーレコードを作成または上書きする
    async fn upsert_member(&self, code: &RoomCode, member: Member) -> Result<(), RepositoryError>;

    /// メンバーレコードを削除する
    async fn remove_member(
        &self,
        code: &RoomCode,
        name: &MemberName,
    ) -> Result<(), RepositoryError>;

    /// 全ルームを取得する（デバッグ用ダンプ）
    async fn list_rooms(&self) -> Vec<Room>;
}
