//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::{StatusCode, header},
    response::IntoResponse,
};
use hackroom_shared::time::timestamp_to_rfc3339;

use crate::{
    domain::entity::file::sanitize_file_name,
    infrastructure::dto::{
        http::{
            FileUrlDto, MessageResponseDto, RoomExistsDto, RoomSummaryDto, UploadResponseDto,
        },
        websocket::FileDto,
    },
    ui::{error::ApiError, state::AppState},
    usecase::FileUpload,
};

const DEFAULT_MIMETYPE: &str = "application/octet-stream";

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.room_query.list_rooms().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.as_str().to_string(),
            participants: room
                .participants
                .iter()
                .map(|p| p.username.as_str().to_string())
                .collect(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        })
        .collect();

    Json(room_summaries)
}

/// Whether a room is active or has any stored records
pub async fn room_exists(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomExistsDto>, ApiError> {
    let exists = state.room_query.room_exists(room_id).await?;
    Ok(Json(RoomExistsDto { exists }))
}

fn bad_multipart(error: MultipartError) -> ApiError {
    ApiError::BadRequest(error.body_text())
}

/// Upload a file (multipart fields `roomId`, `username`, `file`)
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponseDto>), ApiError> {
    let mut room_id = None;
    let mut username = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "roomId" => room_id = Some(field.text().await.map_err(bad_multipart)?),
            "username" => username = Some(field.text().await.map_err(bad_multipart)?),
            "file" => {
                let file_name = field.file_name().unwrap_or("file").to_string();
                let mimetype = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIMETYPE)
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some((file_name, mimetype, bytes.to_vec()));
            }
            other => tracing::debug!("Ignoring unexpected multipart field '{}'", other),
        }
    }

    let missing =
        |field: &str| ApiError::BadRequest(format!("Missing multipart field '{}'", field));
    let (file_name, mimetype, bytes) = file.ok_or_else(|| missing("file"))?;
    let upload = FileUpload {
        room_id: room_id.ok_or_else(|| missing("roomId"))?,
        username: username.ok_or_else(|| missing("username"))?,
        file_name,
        mimetype,
        bytes,
    };

    let file = state.file.upload(upload).await?;
    Ok((
        StatusCode::CREATED,
        Json(UploadResponseDto {
            message: "File uploaded".to_string(),
            file: FileDto::from(&file),
        }),
    ))
}

pub async fn get_file_url(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<FileUrlDto>, ApiError> {
    let download_url = state.file.download_url(&file_id).await?;
    Ok(Json(FileUrlDto { download_url }))
}

/// Stream the file back as an attachment under its original name
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let (file, bytes) = state.file.download(&file_id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_file_name(&file.original_name)
    );
    Ok((
        [
            (header::CONTENT_TYPE, file.mimetype),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<MessageResponseDto>, ApiError> {
    state.file.delete(&file_id).await?;
    Ok(Json(MessageResponseDto {
        message: "File deleted".to_string(),
    }))
}
