//! PostgreSQL user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use roster_core::{NewUser, RecordState, RosterError, RosterResult, User, UserId, UserRecord};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgUserRepository {
    /// Creates a new PostgreSQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    age: i32,
    phone: Option<String>,
    address: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: UserId::new(row.id),
                name: row.name,
                email: row.email,
                age: row.age,
                phone: row.phone,
                address: row.address,
                is_active: row.is_active,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            state: RecordState::from_deleted_at(row.deleted_at),
        }
    }
}

fn live_user(row: Option<UserRow>, id: impl ToString) -> RosterResult<User> {
    row.map(UserRecord::from)
        .and_then(UserRecord::into_live)
        .ok_or_else(|| RosterError::not_found("User", id))
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> RosterResult<User> {
        debug!("Creating user with email: {}", user.email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (name, email, age, phone, address, is_active)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, age, phone, address, is_active,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.is_active)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(UserRecord::from(row).user)
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, age, phone, address, is_active,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        live_user(row, id)
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<User> {
        debug!("Finding user by email: {}", email);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, age, phone, address, is_active,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE email = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.inner())
        .await?;

        live_user(row, email)
    }

    async fn find_all(&self, offset: u64, limit: u64) -> RosterResult<Vec<User>> {
        debug!("Listing users: offset={}, limit={}", offset, limit);

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, name, email, age, phone, address, is_active,
                   created_at, updated_at, deleted_at
            FROM users
            WHERE deleted_at IS NULL
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(to_i64(limit))
        .bind(to_i64(offset))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows
            .into_iter()
            .map(UserRecord::from)
            .filter_map(UserRecord::into_live)
            .collect())
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        debug!("Updating user: {}", user.id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET name = $1, email = $2, age = $3, phone = $4, address = $5,
                is_active = $6, updated_at = NOW()
            WHERE id = $7 AND deleted_at IS NULL
            RETURNING id, name, email, age, phone, address, is_active,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.age)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(user.is_active)
        .bind(user.id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        live_user(row, user.id)
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        debug!("Soft-deleting user: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET deleted_at = NOW(), updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> RosterResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE deleted_at IS NULL")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(u64::try_from(count).unwrap_or_default())
    }
}
