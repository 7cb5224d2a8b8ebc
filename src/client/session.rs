//! WebSocket client session management.
//!
//! Drives one session through the binder state machine: validate locally,
//! connect, activate on the server's `room-joined` snapshot, then mirror
//! every line of input into the session's field. Each entered line replaces
//! the whole message; an empty line clears it (enter-to-clear).

use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::{Mutex, mpsc};
use tokio_tungstenite::{connect_async, tungstenite};

use crate::common::fingerprint::compute_local_id;
use crate::infrastructure::dto::websocket::{
    FieldsSnapshotMessage, MemberJoinedMessage, MemberLeftMessage, MessageType, RoomJoinedMessage,
    SetFieldMessage,
};

use super::binder::{FieldView, SessionBinder};
use super::error::ClientError;
use super::formatter::MessageFormatter;

/// Percent-encode a query component (display names may contain spaces)
fn encode_query_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

/// Redisplay the prompt after printing an incoming update
fn redisplay_prompt(member_name: &str) {
    use std::io::Write;
    print!("{}> ", member_name);
    std::io::stdout().flush().ok();
}

/// Run one WebSocket client session until the user exits or the connection drops
pub async fn run_client_session(
    url: &str,
    room_code: &str,
    member_name: &str,
) -> Result<(), ClientError> {
    // Local validation happens before any network call
    let mut binder = SessionBinder::new(room_code, member_name)?;
    binder.begin_join()?;

    let device_id = compute_local_id();
    let url = format!(
        "{}?code={}&name={}&device_id={}",
        url,
        encode_query_component(binder.room_code()),
        encode_query_component(binder.member_name()),
        encode_query_component(&device_id)
    );

    let (ws_stream, _response) = match connect_async(url.as_str()).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response))
            if response.status() == tungstenite::http::StatusCode::NOT_FOUND =>
        {
            return Err(ClientError::RoomNotFound(binder.room_code().to_string()));
        }
        Err(e) => {
            return Err(ClientError::ConnectionError(e.to_string()));
        }
    };

    tracing::info!("Connected to room '{}'", binder.room_code());

    let (mut write, mut read) = ws_stream.split();

    let binder = Arc::new(Mutex::new(binder));
    let binder_for_read = binder.clone();
    let prompt_name = member_name.trim().to_string();

    // Incoming updates: apply authoritative snapshots to the binder and redraw
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(tungstenite::Message::Text(text)) => {
                    handle_server_message(&binder_for_read, &text, &prompt_name).await;
                }
                Ok(tungstenite::Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Blocking thread for rustyline (synchronous readline)
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let readline_prompt = member_name.trim().to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize line editor: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&format!("{}> ", readline_prompt)) {
                Ok(line) => {
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    break;
                }
                Err(e) => {
                    tracing::warn!("Readline error: {}", e);
                    break;
                }
            }
        }
    });

    println!(
        "\nYou are '{}' in room '{}'. Every line replaces your message; an empty line clears it. Press Ctrl+C to exit.\n",
        member_name.trim(),
        room_code.trim()
    );

    // Outgoing updates: optimistic local edit, then an unconditional write
    let result = loop {
        tokio::select! {
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // User exited; end the session normally
                    break Ok(());
                };

                {
                    let mut binder = binder.lock().await;
                    if !binder.update_my_message(&line) {
                        tracing::warn!("Ignoring input while not active");
                        continue;
                    }
                }

                let msg = SetFieldMessage {
                    r#type: MessageType::SetField,
                    text: line,
                };
                let json = serde_json::to_string(&msg).unwrap();
                if write.send(tungstenite::Message::Text(json.into())).await.is_err() {
                    break Err(ClientError::ConnectionError(
                        "failed to send field update".to_string(),
                    ));
                }
            }
            connection_error = &mut read_task => {
                let connection_error = connection_error.unwrap_or(true);
                if connection_error {
                    break Err(ClientError::ConnectionError(
                        "connection lost".to_string(),
                    ));
                }
                break Ok(());
            }
        }
    };

    // Teardown on every exit path: mark the session Left and cancel the
    // subscription task. The server-side disconnect cleanup fires when the
    // socket drops.
    binder.lock().await.leave();
    read_task.abort();

    result
}

/// Dispatch one server message by its `type` tag
async fn handle_server_message(binder: &Arc<Mutex<SessionBinder>>, text: &str, prompt: &str) {
    if let Ok(joined) = serde_json::from_str::<RoomJoinedMessage>(text) {
        let mut binder = binder.lock().await;
        if let Err(e) = binder.activate(joined.room.name.clone()) {
            tracing::warn!("Unexpected room-joined: {}", e);
            return;
        }
        binder.apply_snapshot(joined.seq, to_field_views(&joined.fields));
        print!(
            "{}",
            MessageFormatter::format_room_joined(
                &joined.room.name,
                &joined.room.code,
                binder.active_member_count()
            )
        );
        print!(
            "{}",
            MessageFormatter::format_field_view(binder.my_message(), binder.others())
        );
        redisplay_prompt(prompt);
    } else if let Ok(snapshot) = serde_json::from_str::<FieldsSnapshotMessage>(text) {
        let mut binder = binder.lock().await;
        if !binder.apply_snapshot(snapshot.seq, to_field_views(&snapshot.fields)) {
            // Concurrent updates can deliver snapshots out of order; a stale
            // one must not overwrite the newer view already on screen.
            tracing::debug!("Discarding stale fields-snapshot (seq {})", snapshot.seq);
            return;
        }
        print!(
            "{}",
            MessageFormatter::format_field_view(binder.my_message(), binder.others())
        );
        redisplay_prompt(prompt);
    } else if let Ok(joined) = serde_json::from_str::<MemberJoinedMessage>(text) {
        print!(
            "{}",
            MessageFormatter::format_member_joined(&joined.name, joined.joined_at)
        );
        redisplay_prompt(prompt);
    } else if let Ok(left) = serde_json::from_str::<MemberLeftMessage>(text) {
        print!(
            "{}",
            MessageFormatter::format_member_left(&left.name, left.left_at)
        );
        redisplay_prompt(prompt);
    } else {
        tracing::debug!("Ignoring unknown message: {}", text);
    }
}

fn to_field_views(fields: &[crate::infrastructure::dto::websocket::FieldDto]) -> Vec<FieldView> {
    fields
        .iter()
        .map(|f| FieldView {
            name: f.name.clone(),
            text: f.text.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_component_keeps_unreserved_characters() {
        // テスト項目: 非予約文字はそのまま残る
        // given (前提条件):
        let value = "alice-01_x.~";

        // when (操作):
        let encoded = encode_query_component(value);

        // then (期待する結果):
        assert_eq!(encoded, "alice-01_x.~");
    }

    #[test]
    fn test_encode_query_component_escapes_spaces_and_symbols() {
        // テスト項目: 空白と記号はパーセントエンコードされる
        // given (前提条件):
        let value = "Budi Santoso&co";

        // when (操作):
        let encoded = encode_query_component(value);

        // then (期待する結果):
        assert_eq!(encoded, "Budi%20Santoso%26co");
    }

    #[test]
    fn test_encode_query_component_handles_multibyte() {
        // テスト項目: マルチバイト文字はバイト単位でエンコードされる
        // given (前提条件):
        let value = "ルーム";

        // when (操作):
        let encoded = encode_query_component(value);

        // then (期待する結果):
        assert!(encoded.starts_with('%'));
        assert!(encoded.chars().all(|c| c == '%' || c.is_ascii_hexdigit()));
    }
}
