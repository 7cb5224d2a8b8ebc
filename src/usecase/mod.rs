//! UseCase 層
//!
//! 1 操作 = 1 ユースケース。ドメイン層の trait（Repository / Pusher /
//! Clock）にのみ依存し、プロトコルの詳細（HTTP / WebSocket）を知りません。
//! メッセージの直列化は UI 層の責務で、ユースケースは直列化済みの
//! 文字列を受け取ってブロードキャストします。

mod create_room;
mod error;
mod get_room;
mod join_room;
mod leave_room;
mod update_field;

pub use create_room::CreateRoomUseCase;
pub use error::{CreateRoomError, GetRoomError, JoinError, LeaveError, UpdateFieldError};
pub use get_room::GetRoomUseCase;
pub use join_room::{JoinRoomUseCase, JoinedSession};
pub use leave_room::LeaveRoomUseCase;
pub use update_field::UpdateFieldUseCase;
