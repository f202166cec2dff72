//! In-memory cache with expiry.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::Mutex;
use roster_core::{HealthCheck, HealthStatus, RosterError, RosterResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::time::Instant;

/// Number of calls made to each cache operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCalls {
    pub get: usize,
    pub set: usize,
    pub delete: usize,
}

impl CacheCalls {
    /// Total number of calls across all operations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.get + self.set + self.delete
    }
}

struct Entry {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

/// In-memory cache.
///
/// Entries expire on read once their TTL has elapsed. Expiry follows the
/// tokio clock, so paused-time tests can advance past it.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, Entry>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    deletes: AtomicUsize,
    unavailable: AtomicBool,
}

impl InMemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the call counters.
    #[must_use]
    pub fn calls(&self) -> CacheCalls {
        CacheCalls {
            get: self.gets.load(Ordering::SeqCst),
            set: self.sets.load(Ordering::SeqCst),
            delete: self.deletes.load(Ordering::SeqCst),
        }
    }

    /// Makes every operation fail with a cache error while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Stores a raw value directly, bypassing counters and availability.
    pub fn insert_raw(&self, key: &str, value: &str, ttl: Duration) {
        self.entries.lock().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                ttl,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// Returns the unexpired raw value under `key` without counting a read.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.value.clone())
    }

    /// Returns the TTL the entry under `key` was stored with.
    #[must_use]
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().get(key).map(|entry| entry.ttl)
    }

    fn enter(&self, counter: &AtomicUsize) -> RosterResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RosterError::Cache("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        self.enter(&self.gets)?;
        let mut entries = self.entries.lock();
        let expired = entries
            .get(key)
            .is_some_and(|entry| entry.expires_at <= Instant::now());
        if expired {
            entries.remove(key);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()> {
        self.enter(&self.sets)?;
        self.insert_raw(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        self.enter(&self.deletes)?;
        Ok(self.entries.lock().remove(key).is_some())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[async_trait]
impl HealthCheck for InMemoryCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if self.unavailable.load(Ordering::SeqCst) {
            HealthStatus::Degraded("connection refused".to_string())
        } else {
            HealthStatus::Healthy
        }
    }
}
