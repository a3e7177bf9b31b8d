//! HTTP error type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use vecdraw_core::{CommandError, QueueError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("room_id must not be empty")]
    EmptyRoom,
    #[error("Invalid batch: {0}")]
    InvalidBatch(#[from] CommandError),
    #[error(transparent)]
    Queue(#[from] QueueError),
    #[error("Session for room {0} is unavailable")]
    SessionPoisoned(String),
    #[error("Failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::EmptyRoom | ApiError::InvalidBatch(_) => StatusCode::BAD_REQUEST,
            ApiError::Queue(_) | ApiError::SessionPoisoned(_) | ApiError::Encode(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
