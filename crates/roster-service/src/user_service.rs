//! User service trait definition.

use crate::dto::{UserListResponse, UserRequest, UserResponse};
use async_trait::async_trait;
use roster_core::{Interface, RosterResult, UserId};

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: UserRequest) -> RosterResult<UserResponse>;

    /// Gets a user by ID, serving from cache when possible.
    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse>;

    /// Lists users one page at a time.
    ///
    /// Out-of-range `page` and `page_size` values fall back to defaults.
    async fn list_users(&self, page: i64, page_size: i64) -> RosterResult<UserListResponse>;

    /// Replaces a user's fields.
    ///
    /// The request is validated before any storage call.
    async fn update_user(&self, id: UserId, request: UserRequest) -> RosterResult<UserResponse>;

    /// Soft-deletes a user.
    async fn delete_user(&self, id: UserId) -> RosterResult<()>;
}
