//! Shared file metadata
//!
//! The bytes themselves live in a [`crate::domain::BlobStore`] under
//! `stored_name`; this record is what rooms list and broadcast.

use crate::domain::value_object::{FileId, RoomId, Timestamp, Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub id: FileId,
    pub room_id: RoomId,
    pub uploaded_by: Username,
    /// Name of the blob in the store
    pub stored_name: String,
    /// Name the uploader's file had, used for downloads
    pub original_name: String,
    pub size: u64,
    pub mimetype: String,
    pub upload_date: Timestamp,
}

impl SharedFile {
    pub fn new(
        room_id: RoomId,
        uploaded_by: Username,
        original_name: &str,
        size: u64,
        mimetype: String,
        upload_date: Timestamp,
    ) -> Self {
        let id = FileId::generate();
        let stored_name = format!("{}-{}", id, sanitize_file_name(original_name));
        Self {
            id,
            room_id,
            uploaded_by,
            stored_name,
            original_name: original_name.to_string(),
            size,
            mimetype,
            upload_date,
        }
    }
}

/// Reduce an uploaded file name to a safe single path component.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories() {
        // テスト項目: パス区切りを含むファイル名はベース名だけが残る
        // given (前提条件):
        let name = "../../etc/passwd";

        // when (操作):
        let result = sanitize_file_name(name);

        // then (期待する結果):
        assert_eq!(result, "passwd");
    }

    #[test]
    fn test_sanitize_replaces_unsafe_characters() {
        // テスト項目: 安全でない文字は '_' に置き換えられる
        // given (前提条件):
        let name = "my slides (final).pdf";

        // when (操作):
        let result = sanitize_file_name(name);

        // then (期待する結果):
        assert_eq!(result, "my_slides__final_.pdf");
    }

    #[test]
    fn test_sanitize_falls_back_for_hidden_or_empty_names() {
        // テスト項目: 空や隠しファイルだけの名前は "file" になる
        // given (前提条件):

        // when (操作):
        let empty = sanitize_file_name("");
        let dots = sanitize_file_name("...");

        // then (期待する結果):
        assert_eq!(empty, "file");
        assert_eq!(dots, "file");
    }

    #[test]
    fn test_stored_name_is_prefixed_with_id() {
        // テスト項目: 保存名はファイル ID で始まる
        // given (前提条件):
        let room_id = RoomId::new("abc123".to_string()).unwrap();
        let uploader = Username::new("alice".to_string()).unwrap();

        // when (操作):
        let file = SharedFile::new(
            room_id,
            uploader,
            "notes.txt",
            12,
            "text/plain".to_string(),
            Timestamp::new(0),
        );

        // then (期待する結果):
        assert!(file.stored_name.starts_with(&file.id.to_string()));
        assert!(file.stored_name.ends_with("-notes.txt"));
        assert_eq!(file.original_name, "notes.txt");
    }
}
