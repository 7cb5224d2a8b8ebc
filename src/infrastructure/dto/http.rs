//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub code: String,
    pub name: String,
}

/// Room summary for the rooms list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub code: String,
    pub name: String,
    pub member_count: usize,
    /// RFC 3339 in WIB
    pub created_at: String,
}

/// Member detail within a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDetailDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    /// RFC 3339 in WIB
    pub joined_at: String,
}

/// Room detail for `GET /api/rooms/{code}` and `POST /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub code: String,
    pub name: String,
    pub members: Vec<MemberDetailDto>,
    /// RFC 3339 in WIB
    pub created_at: String,
}

/// Error body for 4xx responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
