//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::infrastructure::dto::http::{
    CreateRoomRequest, ErrorBody, RoomDetailDto, RoomSummaryDto,
};
use crate::usecase::{CreateRoomError, GetRoomError};

use super::super::state::AppState;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Create a room
///
/// `POST /api/rooms` -> 201 with room detail, 409 if the code is taken,
/// 400 on validation failure.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    match state
        .create_room_usecase
        .execute(request.code, request.name)
        .await
    {
        Ok(room) => Ok((StatusCode::CREATED, Json(RoomDetailDto::from(&room)))),
        Err(CreateRoomError::CodeTaken(code)) => {
            tracing::warn!("Room code '{}' is already taken", code);
            Err((
                StatusCode::CONFLICT,
                Json(ErrorBody {
                    error: format!("room code '{}' is already taken", code),
                }),
            ))
        }
        Err(CreateRoomError::Validation(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: e.to_string(),
            }),
        )),
    }
}

/// Get room detail by code
///
/// `GET /api/rooms/{code}` -> 200 with room detail, 404 if unknown.
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<RoomDetailDto>, (StatusCode, Json<ErrorBody>)> {
    match state.get_room_usecase.execute(code).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(GetRoomError::NotFound(code)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: format!("room '{}' was not found", code),
            }),
        )),
        Err(GetRoomError::Validation(e)) => Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: e.to_string(),
            }),
        )),
    }
}

/// List room summaries
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_room_usecase.list().await;
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Debug endpoint to dump the whole room tree (for testing purposes)
pub async fn debug_rooms(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let rooms = state.get_room_usecase.list().await;
    Json(serde_json::json!({ "rooms": rooms }))
}
