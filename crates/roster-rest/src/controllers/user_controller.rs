//! User management controller.

use crate::{
    extractors::{JsonBody, PaginationQuery, UserIdPath},
    responses::{created, ok, ApiResult, DataResponse, ListResponse, MessageResponse},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use roster_core::ErrorResponse;
use roster_service::{UserRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// List users one page at a time.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(PaginationQuery),
    responses(
        (status = 200, description = "One page of users under `data`, with `pagination`", body = [UserResponse]),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    query: Option<Query<PaginationQuery>>,
) -> ApiResult<Json<ListResponse<UserResponse>>> {
    let query = query.map(|Query(query)| query).unwrap_or_default();
    debug!("List users request: page={:?} page_size={:?}", query.page, query.page_size);

    let page = state
        .user_service
        .list_users(query.page(), query.page_size())
        .await?;
    Ok(Json(ListResponse {
        data: page.users,
        pagination: page.pagination,
    }))
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created, returned under `data`", body = UserResponse),
        (status = 400, description = "Invalid body, validation failure or duplicate email", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<(StatusCode, Json<DataResponse<UserResponse>>)> {
    debug!("Create user request: {}", request.email);

    let user = state.user_service.create_user(request).await?;
    created(user, "User created successfully")
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user under `data`", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    debug!("Get user request: {}", id);

    let user = state.user_service.get_user(id).await?;
    ok(user)
}

/// Replace a user's fields.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = u32, Path, description = "User ID")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "The updated user under `data`", body = UserResponse),
        (status = 400, description = "Invalid ID or body, validation failure or duplicate email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    JsonBody(request): JsonBody<UserRequest>,
) -> ApiResult<Json<DataResponse<UserResponse>>> {
    debug!("Update user request: {}", id);

    let user = state.user_service.update_user(id, request).await?;
    Ok(Json(DataResponse::with_message(
        user,
        "User updated successfully",
    )))
}

/// Soft-delete a user.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = u32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Json<MessageResponse>> {
    debug!("Delete user request: {}", id);

    state.user_service.delete_user(id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
