//! WebSocket connection handler.
//!
//! One WebSocket connection is one session in one room. The session identity
//! (room code + member name) is fixed by the connect query; afterwards the
//! client only ever sends `set-field` messages. Teardown of this handler is
//! the connection-scoped disconnect cleanup: it runs whether the peer left
//! gracefully or the transport dropped.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::common::time::get_wib_timestamp;
use crate::domain::{ConnectionId, MemberName, RoomCode, snapshot::build_field_list};
use crate::infrastructure::dto::websocket::{
    FieldDto, FieldsSnapshotMessage, MemberDto, MemberJoinedMessage, MemberLeftMessage,
    MessageType, RoomJoinedMessage, SetFieldMessage,
};
use crate::usecase::{JoinError, JoinedSession};

use super::super::state::AppState;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub code: String,
    pub name: String,
    pub device_id: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Create a channel for this session to receive room updates
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = ConnectionId::generate();

    // Establish the session: empty-field write, subscription registration,
    // member record. The disconnect cleanup is armed by this call.
    let session = match state
        .join_room_usecase
        .execute(query.code, query.name, query.device_id, connection_id, tx)
        .await
    {
        Ok(session) => session,
        Err(JoinError::RoomNotFound(code)) => {
            tracing::warn!("Join rejected: room '{}' was not found", code);
            return Err(StatusCode::NOT_FOUND);
        }
        Err(JoinError::Validation(e)) => {
            tracing::warn!("Join rejected: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    tracing::info!(
        "Session '{}' opened for member '{}' in room '{}'",
        connection_id,
        session.member.name,
        session.room.code
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session, connection_id, rx)))
}

/// Spawns a task that forwards room updates from the rx channel to this
/// session's WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: JoinedSession,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (mut sender, mut receiver) = socket.split();

    let room_code = session.room.code.clone();
    let member_name = session.member.name.clone();

    // Send the initial snapshot to the newly joined session. The subscription
    // contract delivers the current value immediately, then on every change.
    let joined_msg = build_room_joined_message(&session);
    let joined_json = serde_json::to_string(&joined_msg).unwrap();
    if sender
        .send(Message::Text(joined_json.into()))
        .await
        .is_err()
    {
        tracing::warn!(
            "Failed to send room-joined to '{}'; tearing down session",
            member_name
        );
        teardown_session(&state, &room_code, &member_name, &connection_id).await;
        return;
    }

    // Notify the rest of the room: a member joined and the field mapping
    // changed (the new empty field appeared).
    {
        let member_msg = MemberJoinedMessage {
            r#type: MessageType::MemberJoined,
            name: member_name.as_str().to_string(),
            joined_at: session.member.joined_at.value(),
        };
        let member_json = serde_json::to_string(&member_msg).unwrap();
        state
            .join_room_usecase
            .broadcast_joined(&room_code, &connection_id, &member_json)
            .await;

        let snapshot_msg = FieldsSnapshotMessage {
            r#type: MessageType::FieldsSnapshot,
            seq: session.room.fields_seq,
            fields: build_field_list(&session.room.fields)
                .iter()
                .map(FieldDto::from)
                .collect(),
        };
        let snapshot_json = serde_json::to_string(&snapshot_msg).unwrap();
        state
            .join_room_usecase
            .broadcast_joined(&room_code, &connection_id, &snapshot_json)
            .await;
    }

    // Outbound: room updates -> this session's socket
    let mut send_task = pusher_loop(rx, sender);

    // Inbound: set-field messages from this session
    let state_clone = state.clone();
    let room_code_clone = room_code.clone();
    let member_name_clone = member_name.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let set_field = match serde_json::from_str::<SetFieldMessage>(&text) {
                        Ok(msg) => msg,
                        Err(e) => {
                            tracing::warn!("Ignoring malformed message: {}", e);
                            continue;
                        }
                    };

                    handle_set_field(
                        &state_clone,
                        &room_code_clone,
                        &member_name_clone,
                        set_field.text,
                    )
                    .await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Session of '{}' requested close", member_name_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    teardown_session(&state, &room_code, &member_name, &connection_id).await;
}

/// Apply a `set-field` update and fan out the new snapshot to the whole room,
/// including the originating session (its server-confirmed echo).
async fn handle_set_field(
    state: &Arc<AppState>,
    room_code: &RoomCode,
    member_name: &MemberName,
    text: String,
) {
    let snapshot = match state
        .update_field_usecase
        .execute(room_code, member_name, text)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Field update by '{}' failed: {}", member_name, e);
            return;
        }
    };

    let snapshot_msg = FieldsSnapshotMessage {
        r#type: MessageType::FieldsSnapshot,
        seq: snapshot.seq,
        fields: snapshot.entries.iter().map(FieldDto::from).collect(),
    };
    let snapshot_json = serde_json::to_string(&snapshot_msg).unwrap();
    state
        .update_field_usecase
        .broadcast_snapshot(room_code, &snapshot_json)
        .await;
}

/// Connection-scoped cleanup: delete the session's field and member record,
/// cancel the subscription, and notify the remaining sessions. Runs on every
/// exit path of the handler.
async fn teardown_session(
    state: &Arc<AppState>,
    room_code: &RoomCode,
    member_name: &MemberName,
    connection_id: &ConnectionId,
) {
    let snapshot = match state
        .leave_room_usecase
        .execute(room_code, member_name, connection_id)
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Teardown of '{}' failed: {}", member_name, e);
            return;
        }
    };

    if state
        .leave_room_usecase
        .count_remaining_subscribers(room_code)
        .await
        == 0
    {
        return;
    }

    let left_msg = MemberLeftMessage {
        r#type: MessageType::MemberLeft,
        name: member_name.as_str().to_string(),
        left_at: get_wib_timestamp(),
    };
    let left_json = serde_json::to_string(&left_msg).unwrap();
    state
        .leave_room_usecase
        .broadcast_left(room_code, &left_json)
        .await;

    let snapshot_msg = FieldsSnapshotMessage {
        r#type: MessageType::FieldsSnapshot,
        seq: snapshot.seq,
        fields: snapshot.entries.iter().map(FieldDto::from).collect(),
    };
    let snapshot_json = serde_json::to_string(&snapshot_msg).unwrap();
    state
        .leave_room_usecase
        .broadcast_left(room_code, &snapshot_json)
        .await;
}

/// Build the initial `room-joined` snapshot for a new session.
fn build_room_joined_message(session: &JoinedSession) -> RoomJoinedMessage {
    let mut members: Vec<MemberDto> = session.room.members.values().map(MemberDto::from).collect();
    // Sort by name for consistent ordering
    members.sort_by(|a, b| a.name.cmp(&b.name));

    RoomJoinedMessage {
        r#type: MessageType::RoomJoined,
        room: (&session.room).into(),
        seq: session.room.fields_seq,
        fields: build_field_list(&session.room.fields)
            .iter()
            .map(FieldDto::from)
            .collect(),
        members,
    }
}
