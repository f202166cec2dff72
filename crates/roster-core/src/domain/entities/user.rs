//! User entity.

use super::super::value_objects::RecordState;
use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A live user record.
///
/// Values of this type never describe a soft-deleted row; the persistence
/// layer only hands out users whose [`RecordState`] is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, unique among live users.
    pub email: String,
    /// Age in years.
    pub age: i32,
    /// Optional phone number.
    pub phone: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// Whether the account is active.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// The fields of a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: i32,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
}

impl NewUser {
    /// Creates an active user with no phone or address.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, age: i32) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age,
            phone: None,
            address: None,
            is_active: true,
        }
    }

    /// Sets the phone number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Sets the active flag.
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Materializes the user with a storage-assigned id and timestamp.
    #[must_use]
    pub fn into_user(self, id: UserId, now: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
            phone: self.phone,
            address: self.address,
            is_active: self.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A full storage row: the user fields plus its deletion state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub user: User,
    pub state: RecordState,
}

impl UserRecord {
    /// Wraps a freshly inserted user.
    #[must_use]
    pub const fn active(user: User) -> Self {
        Self {
            user,
            state: RecordState::Active,
        }
    }

    /// Returns true if the record has not been soft-deleted.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.state.is_active()
    }

    /// Returns the user if the record is live.
    #[must_use]
    pub fn into_live(self) -> Option<User> {
        match self.state {
            RecordState::Active => Some(self.user),
            RecordState::Deleted { .. } => None,
        }
    }

    /// Returns a reference to the user if the record is live.
    #[must_use]
    pub fn live(&self) -> Option<&User> {
        match self.state {
            RecordState::Active => Some(&self.user),
            RecordState::Deleted { .. } => None,
        }
    }

    /// Marks the record soft-deleted at `at`.
    ///
    /// Returns false if the record was already deleted.
    pub fn mark_deleted(&mut self, at: DateTime<Utc>) -> bool {
        if !self.is_live() {
            return false;
        }
        self.state = RecordState::Deleted { at };
        self.user.updated_at = at;
        true
    }
}
