//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use super::websocket::FileDto;

/// Entry of `GET /api/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub participants: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomExistsDto {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub message: String,
    pub file: FileDto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUrlDto {
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponseDto {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub error: String,
}
