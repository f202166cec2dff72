//! User ID path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use roster_core::{ErrorResponse, UserId};

/// Extracts the `:id` path segment as a [`UserId`].
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

/// Rejection returned when the path segment is not a valid user ID.
#[derive(Debug)]
pub struct InvalidUserId;

impl IntoResponse for InvalidUserId {
    fn into_response(self) -> Response {
        let body = ErrorResponse::new("Invalid user ID", "INVALID_ID");
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = InvalidUserId;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| InvalidUserId)?;
        UserId::parse(&raw).map(Self).map_err(|_| InvalidUserId)
    }
}
