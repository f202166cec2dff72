//! Repository trait definitions.

use roster_core::{Interface, NewUser, RosterResult, User, UserId};
use async_trait::async_trait;

/// Persistence gateway for users.
///
/// Every read only sees live rows. Soft-deleted rows stay in storage but are
/// invisible to lookups, listings, counts and the email uniqueness check.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts a new user and returns it with its assigned id and timestamps.
    ///
    /// Fails with `AlreadyExists` if a live user already owns the email.
    async fn create(&self, user: &NewUser) -> RosterResult<User>;

    /// Finds a live user by ID.
    async fn find_by_id(&self, id: UserId) -> RosterResult<User>;

    /// Finds a live user by exact email.
    async fn find_by_email(&self, email: &str) -> RosterResult<User>;

    /// Lists live users ordered by id.
    async fn find_all(&self, offset: u64, limit: u64) -> RosterResult<Vec<User>>;

    /// Persists the mutable fields of a live user and bumps `updated_at`.
    async fn update(&self, user: &User) -> RosterResult<User>;

    /// Soft-deletes a live user.
    ///
    /// Returns false if no live user matched.
    async fn delete(&self, id: UserId) -> RosterResult<bool>;

    /// Counts live users.
    async fn count(&self) -> RosterResult<u64>;
}
