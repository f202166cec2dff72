//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentStatus, HealthResponse, ReadinessResponse};
use crate::responses::MessageResponse;
use roster_core::{ErrorDetails, ErrorResponse, FieldError, PageInfo, UserId};
use roster_service::{UserListResponse, UserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "CRUD API for user records"
    ),
    paths(
        // User endpoints
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::get_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            PageInfo,
            ErrorResponse,
            ErrorDetails,
            FieldError,
            MessageResponse,
            UserRequest,
            UserResponse,
            UserListResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentStatus,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_user_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/api/v1/users"));
        assert!(doc.paths.paths.contains_key("/api/v1/users/{id}"));
        assert!(doc.paths.paths.contains_key("/ready"));
    }
}
