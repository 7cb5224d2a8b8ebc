//! WebSocket message DTOs.
//!
//! Every message carries a `type` tag. The server pushes the *entire* field
//! mapping of a room on every change (snapshot, not diff); the client sends
//! only the new text for its own field, since the session identity is fixed
//! at connect time.

use serde::{Deserialize, Serialize};

/// WebSocket message type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    /// Initial snapshot sent to a newly joined session
    RoomJoined,
    /// Full field mapping, sent on every field change
    FieldsSnapshot,
    /// A member joined the room
    MemberJoined,
    /// A member left the room
    MemberLeft,
    /// Client -> server: overwrite my field
    SetField,
}

/// Room metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomInfoDto {
    pub code: String,
    pub name: String,
    /// Unix timestamp in WIB (milliseconds)
    pub created_at: i64,
}

/// One member's field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDto {
    pub name: String,
    pub text: String,
}

/// One member's presence record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub joined_at: i64,
}

/// Server -> client: initial snapshot on join
///
/// `seq` is the room's field-mapping sequence number at the time of the
/// snapshot; later `fields-snapshot` messages carry higher numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomJoinedMessage {
    pub r#type: MessageType,
    pub room: RoomInfoDto,
    pub seq: u64,
    pub fields: Vec<FieldDto>,
    pub members: Vec<MemberDto>,
}

/// Server -> client: full field mapping after a change
///
/// The mapping and `seq` are captured atomically on the server, so a higher
/// `seq` always means a newer state. Clients drop snapshots older than the
/// one they last applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldsSnapshotMessage {
    pub r#type: MessageType,
    pub seq: u64,
    pub fields: Vec<FieldDto>,
}

/// Server -> client: a member joined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberJoinedMessage {
    pub r#type: MessageType,
    pub name: String,
    pub joined_at: i64,
}

/// Server -> client: a member left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberLeftMessage {
    pub r#type: MessageType,
    pub name: String,
    pub left_at: i64,
}

/// Client -> server: overwrite my field with the given text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetFieldMessage {
    pub r#type: MessageType,
    pub text: String,
}
