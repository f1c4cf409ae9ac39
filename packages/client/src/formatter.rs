//! Message formatting utilities for client display.

use hackroom_server::infrastructure::dto::websocket::{
    ChatMessageDto, FileDto, NoteDto, ServerEvent, TimerDto,
};
use hackroom_shared::time::timestamp_to_rfc3339;

use crate::domain::{format_remaining, status_label};

const RULE: &str = "------------------------------------------------------------";
const DOUBLE_RULE: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render any server event; `me` is our own username
    pub fn format_event(event: &ServerEvent, me: &str) -> String {
        match event {
            ServerEvent::UsernameResponse(response) => format!("\n{}\n", response.message),
            ServerEvent::RoomJoined(joined) => Self::format_room_joined(joined.is_new_room),
            ServerEvent::Message(message) => Self::format_chat_message(message, me),
            ServerEvent::MessageHistory(messages) => Self::format_history(messages, me),
            ServerEvent::TimerUpdate(timer) => Self::format_timer(timer),
            ServerEvent::NotesHistory(notes) => Self::format_notes(notes),
            ServerEvent::NoteAdded(note) => format!("\n{}\n", Self::format_note(note)),
            ServerEvent::NoteDeleted(deleted) => format!("\n- note {} removed\n", deleted.note_id),
            ServerEvent::FilesList(files) => Self::format_files(files),
            ServerEvent::FileAdded(file) => format!("\n{}\n", Self::format_file(file)),
            ServerEvent::FileRemoved(removed) => format!("\n- file {} removed\n", removed.file_id),
            ServerEvent::JoinRoomError(e) => Self::format_error("join", &e.error),
            ServerEvent::MessageError(e) => Self::format_error("message", &e.error),
            ServerEvent::TimerError(e) => Self::format_error("timer", &e.error),
            ServerEvent::NoteError(e) => Self::format_error("note", &e.error),
            ServerEvent::FileError(e) => Self::format_error("file", &e.error),
            ServerEvent::RequestError(e) => Self::format_error("request", &e.error),
        }
    }

    pub fn format_room_joined(is_new_room: bool) -> String {
        let how = if is_new_room {
            "Created a new room"
        } else {
            "Joined the room"
        };
        format!("\n{}\n{}. Type /help for commands.\n{}\n", DOUBLE_RULE, how, DOUBLE_RULE)
    }

    /// Format a chat message; our own messages are marked "(me)"
    pub fn format_chat_message(message: &ChatMessageDto, me: &str) -> String {
        let me_suffix = if message.username == me { " (me)" } else { "" };
        format!(
            "\n{}\n@{}{}: {}\nsent at {}\n{}\n",
            RULE,
            message.username,
            me_suffix,
            message.message,
            timestamp_to_rfc3339(message.timestamp),
            RULE
        )
    }

    pub fn format_history(messages: &[ChatMessageDto], me: &str) -> String {
        if messages.is_empty() {
            return "\n(No messages yet)\n".to_string();
        }
        let mut output = format!("\nRecent messages ({}):\n", messages.len());
        for message in messages {
            let me_suffix = if message.username == me { " (me)" } else { "" };
            output.push_str(&format!(
                "  [{}] @{}{}: {}\n",
                timestamp_to_rfc3339(message.timestamp),
                message.username,
                me_suffix,
                message.message
            ));
        }
        output
    }

    pub fn format_timer(timer: &TimerDto) -> String {
        let mut output = format!(
            "\n[timer] {} {} (last update by {})\n",
            format_remaining(timer.remaining_time),
            status_label(timer.status),
            timer.last_update_by
        );
        if let Some(entry) = timer.log.last() {
            output.push_str(&format!(
                "        {} by {} at {}\n",
                entry.action,
                entry.actor,
                timestamp_to_rfc3339(entry.timestamp)
            ));
        }
        output
    }

    pub fn format_note(note: &NoteDto) -> String {
        format!("[note {}] {}: {}", note.id, note.username, note.content)
    }

    pub fn format_notes(notes: &[NoteDto]) -> String {
        if notes.is_empty() {
            return "\n(No notes)\n".to_string();
        }
        let mut output = String::from("\nNotes:\n");
        for note in notes {
            output.push_str(&format!("  {}\n", Self::format_note(note)));
        }
        output
    }

    pub fn format_file(file: &FileDto) -> String {
        format!(
            "[file {}] {} ({} bytes, {}) shared by {}",
            file.id, file.original_name, file.size, file.mimetype, file.uploaded_by
        )
    }

    pub fn format_files(files: &[FileDto]) -> String {
        if files.is_empty() {
            return "\n(No files)\n".to_string();
        }
        let mut output = String::from("\nFiles:\n");
        for file in files {
            output.push_str(&format!("  {}\n", Self::format_file(file)));
        }
        output
    }

    pub fn format_error(kind: &str, message: &str) -> String {
        format!("\n! {} error: {}\n", kind, message)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hackroom_server::infrastructure::dto::websocket::{
        ErrorDto, TimerLogEntryDto, TimerStatusDto,
    };

    fn chat(username: &str, message: &str) -> ChatMessageDto {
        ChatMessageDto {
            room_id: "abc123".to_string(),
            username: username.to_string(),
            message: message.to_string(),
            timestamp: 1672498800000,
        }
    }

    #[test]
    fn test_format_chat_message_marks_own_messages() {
        // テスト項目: 自分のメッセージには (me) が付き、他人のものには付かない
        // given (前提条件):
        let mine = chat("alice", "Hello, world!");
        let theirs = chat("bob", "Hi!");

        // when (操作):
        let mine = MessageFormatter::format_chat_message(&mine, "alice");
        let theirs = MessageFormatter::format_chat_message(&theirs, "alice");

        // then (期待する結果):
        assert!(mine.contains("@alice (me): Hello, world!"));
        assert!(mine.contains("2022-12-31T15:00:00.000Z"));
        assert!(theirs.contains("@bob: Hi!"));
        assert!(!theirs.contains("(me)"));
    }

    #[test]
    fn test_format_empty_history() {
        // テスト項目: 履歴が空の場合、その旨が表示される
        // given (前提条件):
        let messages: Vec<ChatMessageDto> = vec![];

        // when (操作):
        let result = MessageFormatter::format_history(&messages, "alice");

        // then (期待する結果):
        assert!(result.contains("(No messages yet)"));
    }

    #[test]
    fn test_format_timer_shows_remaining_and_last_action() {
        // テスト項目: タイマー表示に残り時間・状態・直近の操作が含まれる
        // given (前提条件):
        let timer = TimerDto {
            room_id: "abc123".to_string(),
            status: TimerStatusDto::Running,
            remaining_time: 590,
            start_time: Some(1672498800000),
            last_update_by: "bob".to_string(),
            log: vec![TimerLogEntryDto {
                action: "started timer".to_string(),
                actor: "bob".to_string(),
                timestamp: 1672498800000,
            }],
            version: 3,
        };

        // when (操作):
        let result = MessageFormatter::format_timer(&timer);

        // then (期待する結果):
        assert!(result.contains("[timer] 09:50 running (last update by bob)"));
        assert!(result.contains("started timer by bob"));
    }

    #[test]
    fn test_format_note_includes_id() {
        // テスト項目: ノート表示に削除用の ID が含まれる
        // given (前提条件):
        let note = NoteDto {
            id: "n-1".to_string(),
            room_id: "abc123".to_string(),
            username: "alice".to_string(),
            content: "demo at 5pm".to_string(),
            timestamp: 1672498800000,
        };

        // when (操作):
        let result = MessageFormatter::format_note(&note);

        // then (期待する結果):
        assert_eq!(result, "[note n-1] alice: demo at 5pm");
    }

    #[test]
    fn test_format_error_event() {
        // テスト項目: エラーイベントが種類とメッセージ付きで表示される
        // given (前提条件):
        let event = ServerEvent::TimerError(ErrorDto {
            error: "Timer not found".to_string(),
        });

        // when (操作):
        let result = MessageFormatter::format_event(&event, "alice");

        // then (期待する結果):
        assert_eq!(result, "\n! timer error: Timer not found\n");
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: パースできなかったメッセージが生のまま表示される
        // given (前提条件):
        let text = "not json";

        // when (操作):
        let result = MessageFormatter::format_raw_message(text);

        // then (期待する結果):
        assert!(result.contains("Received: not json"));
    }
}
