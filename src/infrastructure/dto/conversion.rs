//! Conversion logic between DTOs and domain entities.

use crate::common::time::timestamp_to_wib_rfc3339;
use crate::domain::{FieldEntry, Member, Room};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// Domain Entity → WebSocket DTO
// ========================================

impl From<&FieldEntry> for dto::FieldDto {
    fn from(entry: &FieldEntry) -> Self {
        Self {
            name: entry.owner.as_str().to_string(),
            text: entry.text.clone(),
        }
    }
}

impl From<&Member> for dto::MemberDto {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.as_str().to_string(),
            device_id: member.device_id.clone(),
            joined_at: member.joined_at.value(),
        }
    }
}

impl From<&Room> for dto::RoomInfoDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code.as_str().to_string(),
            name: room.info.name.as_str().to_string(),
            created_at: room.info.created_at.value(),
        }
    }
}

// ========================================
// Domain Entity → HTTP DTO
// ========================================

impl From<&Member> for http::MemberDetailDto {
    fn from(member: &Member) -> Self {
        Self {
            name: member.name.as_str().to_string(),
            device_id: member.device_id.clone(),
            joined_at: timestamp_to_wib_rfc3339(member.joined_at.value()),
        }
    }
}

impl From<&Room> for http::RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code.as_str().to_string(),
            name: room.info.name.as_str().to_string(),
            member_count: room.members.len(),
            created_at: timestamp_to_wib_rfc3339(room.info.created_at.value()),
        }
    }
}

impl From<&Room> for http::RoomDetailDto {
    fn from(room: &Room) -> Self {
        let mut members: Vec<http::MemberDetailDto> =
            room.members.values().map(Into::into).collect();
        // Sort by name for consistent ordering
        members.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            code: room.code.as_str().to_string(),
            name: room.info.name.as_str().to_string(),
            members,
            created_at: timestamp_to_wib_rfc3339(room.info.created_at.value()),
        }
    }
}
