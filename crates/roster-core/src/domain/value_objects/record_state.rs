//! Soft-delete lifecycle of a stored record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a stored row is live or soft-deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordState {
    /// Visible to reads, lists, counts and uniqueness checks.
    #[default]
    Active,
    /// Logically removed; the row is retained.
    Deleted { at: DateTime<Utc> },
}

impl RecordState {
    /// Builds the state from a nullable deletion timestamp column.
    #[must_use]
    pub fn from_deleted_at(deleted_at: Option<DateTime<Utc>>) -> Self {
        match deleted_at {
            Some(at) => Self::Deleted { at },
            None => Self::Active,
        }
    }

    /// Returns true if the record is live.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns the deletion timestamp, if any.
    #[must_use]
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Deleted { at } => Some(*at),
        }
    }
}
