//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    CreateRoomUseCase, GetRoomUseCase, JoinRoomUseCase, LeaveRoomUseCase, UpdateFieldUseCase,
};

/// Shared application state
pub struct AppState {
    /// CreateRoomUseCase（ルーム作成のユースケース）
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    /// GetRoomUseCase（ルーム取得のユースケース）
    pub get_room_usecase: Arc<GetRoomUseCase>,
    /// JoinRoomUseCase（セッション確立のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// UpdateFieldUseCase（フィールド更新のユースケース）
    pub update_field_usecase: Arc<UpdateFieldUseCase>,
    /// LeaveRoomUseCase（セッション終了のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
}
