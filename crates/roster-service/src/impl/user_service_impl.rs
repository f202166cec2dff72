//! User service implementation.

use crate::cache::{CacheInterface, UserCache};
use crate::dto::{UserListResponse, UserRequest, UserResponse};
use crate::user_service::UserService;
use async_trait::async_trait;
use roster_core::{PageInfo, PageRequest, RosterError, RosterResult, UserId, ValidateExt};
use roster_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User service backed by a repository and a cache-aside layer.
pub struct UserServiceImpl {
    user_repository: Arc<dyn UserRepository>,
    cache: UserCache,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(user_repository: Arc<dyn UserRepository>, cache: Arc<dyn CacheInterface>) -> Self {
        Self {
            user_repository,
            cache: UserCache::new(cache),
        }
    }

    /// Fails with `AlreadyExists` if a live user other than `except` owns `email`.
    async fn ensure_email_free(
        &self,
        email: &str,
        except: Option<UserId>,
        operation: &'static str,
    ) -> RosterResult<()> {
        match self.user_repository.find_by_email(email).await {
            Ok(owner) if Some(owner.id) != except => Err(RosterError::already_exists(format!(
                "user with email {email} already exists"
            ))),
            Ok(_) | Err(RosterError::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.during(operation)),
        }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, request: UserRequest) -> RosterResult<UserResponse> {
        debug!("Creating user: {}", request.email);

        request.validate_request()?;
        self.ensure_email_free(&request.email, None, "create user")
            .await?;

        let user = self
            .user_repository
            .create(&request.into_new_user())
            .await
            .map_err(|e| e.during("create user"))?;

        self.cache.put(&user).await;

        info!("User created: {}", user.id);
        Ok(UserResponse::from(user))
    }

    async fn get_user(&self, id: UserId) -> RosterResult<UserResponse> {
        debug!("Getting user: {}", id);

        if let Some(user) = self.cache.get(id).await {
            return Ok(UserResponse::from(user));
        }

        let user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(|e| e.during("get user"))?;

        self.cache.put(&user).await;
        Ok(UserResponse::from(user))
    }

    async fn list_users(&self, page: i64, page_size: i64) -> RosterResult<UserListResponse> {
        let request = PageRequest::normalized(page, page_size);
        debug!(
            "Listing users, page: {}, size: {}",
            request.page, request.page_size
        );

        let users = self
            .user_repository
            .find_all(request.offset(), request.limit())
            .await
            .map_err(|e| e.during("get users"))?;

        let total = self
            .user_repository
            .count()
            .await
            .map_err(|e| e.during("count users"))?;

        for user in &users {
            self.cache.put(user).await;
        }

        Ok(UserListResponse {
            users: users.into_iter().map(UserResponse::from).collect(),
            pagination: PageInfo::new(request, total),
        })
    }

    async fn update_user(&self, id: UserId, request: UserRequest) -> RosterResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;

        let mut user = self
            .user_repository
            .find_by_id(id)
            .await
            .map_err(|e| e.during("update user"))?;

        if request.email != user.email {
            self.ensure_email_free(&request.email, Some(id), "update user")
                .await?;
        }

        request.apply_to(&mut user);

        let updated = self
            .user_repository
            .update(&user)
            .await
            .map_err(|e| e.during("update user"))?;

        self.cache.put(&updated).await;

        info!("User updated: {}", id);
        Ok(UserResponse::from(updated))
    }

    async fn delete_user(&self, id: UserId) -> RosterResult<()> {
        debug!("Deleting user: {}", id);

        let deleted = self
            .user_repository
            .delete(id)
            .await
            .map_err(|e| e.during("delete user"))?;

        if !deleted {
            return Err(RosterError::not_found("User", id));
        }

        self.cache.invalidate(id).await;

        info!("User deleted: {}", id);
        Ok(())
    }
}
