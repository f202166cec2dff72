//! API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{ErrorResponse, PageInfo, RosterError};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

/// Envelope for a single resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> DataResponse<T> {
    /// Wraps `data` without a message.
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
        }
    }

    /// Wraps `data` with a human-readable message.
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: Some(message.into()),
        }
    }
}

/// Envelope for one page of resources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// Envelope carrying only a message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Application error type for Axum.
#[derive(Debug)]
pub struct AppError(pub RosterError);

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(code = self.0.error_code(), "Request failed: {}", self.0);
        }

        let body = Json(ErrorResponse::from_error(&self.0));
        (status, body).into_response()
    }
}

/// Result type for Axum handlers.
pub type ApiResult<T> = Result<T, AppError>;

/// Helper to create a success response.
pub fn ok<T: Serialize>(data: T) -> ApiResult<Json<DataResponse<T>>> {
    Ok(Json(DataResponse::new(data)))
}

/// Helper to create a created (201) response.
pub fn created<T: Serialize>(
    data: T,
    message: impl Into<String>,
) -> ApiResult<(StatusCode, Json<DataResponse<T>>)> {
    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(data, message)),
    ))
}
