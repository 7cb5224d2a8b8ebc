//! Message formatting utilities for client display.

use crate::common::time::timestamp_to_wib_rfc3339;

use super::binder::FieldView;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the initial room view shown right after joining
    ///
    /// # Arguments
    ///
    /// * `room_name` - Display name of the room
    /// * `room_code` - The shared room code
    /// * `member_count` - Sessions visible in the room, including this one
    pub fn format_room_joined(room_name: &str, room_code: &str, member_count: usize) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("Room: {} (code: {})\n", room_name, room_code));
        output.push_str(&format!("{} member(s) active\n", member_count));
        output.push_str("============================================================\n");
        output
    }

    /// Format the current view of everyone's fields
    ///
    /// The caller's own field is shown separately from the others.
    pub fn format_field_view(my_message: &str, others: &[FieldView]) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n[you] {}\n", render_text(my_message)));

        if others.is_empty() {
            output.push_str("(waiting for friends... share the room code)\n");
        } else {
            for field in others {
                output.push_str(&format!("[{}] {}\n", field.name, render_text(&field.text)));
            }
        }
        output
    }

    /// Format a member-joined notification
    pub fn format_member_joined(name: &str, joined_at: i64) -> String {
        format!("\n+ {} joined at {}\n", name, timestamp_to_wib_rfc3339(joined_at))
    }

    /// Format a member-left notification
    pub fn format_member_left(name: &str, left_at: i64) -> String {
        format!("\n- {} left at {}\n", name, timestamp_to_wib_rfc3339(left_at))
    }
}

/// Empty fields render as a typing indicator, mirroring the blank-bubble
/// presentation of the original UI.
fn render_text(text: &str) -> &str {
    if text.is_empty() { "..." } else { text }
}
