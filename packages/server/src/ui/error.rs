//! HTTP error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::RepositoryError, infrastructure::dto::http::ErrorResponseDto, usecase::FileError,
};

/// Error returned by the HTTP handlers, rendered as `{"error": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponseDto {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<FileError> for ApiError {
    fn from(error: FileError) -> Self {
        match error {
            FileError::InvalidInput(e) => ApiError::BadRequest(e.to_string()),
            FileError::FileNotFound => ApiError::NotFound(error.to_string()),
            FileError::Repository(ref e) => {
                tracing::error!("File store failure: {:?}", e);
                ApiError::Internal(error.to_string())
            }
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        tracing::error!("Store failure: {:?}", error);
        ApiError::Internal("Internal server error".to_string())
    }
}
