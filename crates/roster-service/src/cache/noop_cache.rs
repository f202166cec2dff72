//! Cache that stores nothing.

use super::CacheInterface;
use async_trait::async_trait;
use roster_core::{HealthCheck, HealthStatus, RosterResult};
use std::time::Duration;

/// A cache that never holds anything.
///
/// Used when Redis is disabled or unreachable at startup so the service
/// always reads through to the database.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheInterface for NoopCache {
    async fn get_raw(&self, _key: &str) -> RosterResult<Option<String>> {
        Ok(None)
    }

    async fn set_raw(&self, _key: &str, _value: &str, _ttl: Duration) -> RosterResult<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> RosterResult<bool> {
        Ok(false)
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

#[async_trait]
impl HealthCheck for NoopCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        HealthStatus::Degraded("cache disabled".to_string())
    }
}
