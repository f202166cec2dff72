//! Cache key generators for consistent key naming.

use roster_core::UserId;

/// Generate the cache key for a user snapshot.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("user:{id}")
}
