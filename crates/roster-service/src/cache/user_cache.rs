//! Cache-aside access to user snapshots.

use super::{cache_keys, CacheExt, CacheInterface};
use roster_core::{User, UserId};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How long a user snapshot stays cached (15 minutes).
pub const USER_TTL: Duration = Duration::from_secs(15 * 60);

/// Cache-aside layer for users.
///
/// Never fails: every backend error is logged and treated as a miss.
#[derive(Clone)]
pub struct UserCache {
    cache: Arc<dyn CacheInterface>,
}

impl UserCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>) -> Self {
        Self { cache }
    }

    /// Returns the cached snapshot, or `None` on any miss or failure.
    pub async fn get(&self, id: UserId) -> Option<User> {
        let key = cache_keys::user_by_id(id);
        match self.cache.get::<User>(&key).await {
            Ok(Some(user)) if user.id == id => Some(user),
            Ok(Some(user)) => {
                warn!("Cache entry '{}' holds user {}, ignoring", key, user.id);
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Cache read failed for '{}': {}", key, e);
                None
            }
        }
    }

    /// Stores a snapshot of `user` for [`USER_TTL`].
    pub async fn put(&self, user: &User) {
        let key = cache_keys::user_by_id(user.id);
        match self.cache.set(&key, user, USER_TTL).await {
            Ok(()) => debug!("Cached user {}", user.id),
            Err(e) => warn!("Cache write failed for '{}': {}", key, e),
        }
    }

    /// Drops the cached snapshot for `id`.
    pub async fn invalidate(&self, id: UserId) {
        let key = cache_keys::user_by_id(id);
        if let Err(e) = self.cache.delete(&key).await {
            warn!("Cache invalidation failed for '{}': {}", key, e);
        }
    }
}
