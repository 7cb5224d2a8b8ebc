//! ドメイン層
//!
//! ルームとフィールド同期モデルの中核。値オブジェクト、エンティティ、
//! 純粋なスナップショットロジック、および下位層への抽象インターフェース
//! （Repository / Pusher trait）を定義します。この層は I/O を持ちません。

pub mod entity;
pub mod error;
pub mod pusher;
pub mod repository;
pub mod snapshot;
pub mod value_object;

pub use entity::{FieldEntry, Member, Room, RoomInfo};
pub use error::{DomainError, RepositoryError};
pub use pusher::{ConnectionId, FieldPusher, PushError, PusherChannel};
pub use repository::RoomRepository;
pub use snapshot::FieldsSnapshot;
pub use value_object::{MemberName, RoomCode, RoomName, Timestamp};
