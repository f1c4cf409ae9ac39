//! Value Objects
//!
//! Room / connection / user identifiers and validated text payloads. Every
//! constructor validates its input, so a value that exists is a valid value.

use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length (in characters) of a room id or a username
pub const MAX_NAME_LENGTH: usize = 64;

/// Maximum length (in characters) of a chat message or note body
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// Display name used for server-generated chat messages
pub const SYSTEM_USERNAME: &str = "System";

fn validate_name(field: &'static str, value: String) -> Result<String, ValueObjectError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValueObjectError::Empty(field));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValueObjectError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
        });
    }
    Ok(trimmed.to_string())
}

/// Room identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_name("roomId", value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Display name chosen by a participant
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        validate_name("username", value).map(Self)
    }

    /// The author of join / leave notices
    pub fn system() -> Self {
        Self(SYSTEM_USERNAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one WebSocket connection
///
/// Generated by the server on upgrade; never chosen by the client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generate a fresh random (UUID v4) connection id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("connectionId"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a chat message or a sticky note
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::Empty("content"));
        }
        if value.chars().count() > MAX_CONTENT_LENGTH {
            return Err(ValueObjectError::TooLong {
                field: "content",
                max: MAX_CONTENT_LENGTH,
            });
        }
        Ok(Self(value))
    }

    /// Server-authored text; skips the length limits meant for user input.
    pub(crate) fn notice(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub struct $name(Uuid);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
                Uuid::parse_str(value.trim())
                    .map(Self)
                    .map_err(|_| ValueObjectError::InvalidId {
                        field: $field,
                        value: value.to_string(),
                    })
            }

            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(
    /// Sticky note identifier
    NoteId,
    "noteId"
);

uuid_id!(
    /// Shared file identifier
    FileId,
    "fileId"
);

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Whole seconds elapsed from `earlier` to `self`, floored and never negative.
    pub fn whole_seconds_since(&self, earlier: Timestamp) -> u64 {
        let millis = self.0.saturating_sub(earlier.0);
        if millis <= 0 { 0 } else { (millis / 1000) as u64 }
    }
}
