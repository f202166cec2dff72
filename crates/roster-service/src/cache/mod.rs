//! Caching infrastructure for the service layer.
//!
//! [`UserCache`] sits in front of any [`CacheInterface`] backend: Redis in
//! production, [`NoopCache`] when Redis is unavailable and [`InMemoryCache`]
//! in tests.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod noop_cache;
mod redis_cache;
mod user_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{CacheCalls, InMemoryCache};
pub use noop_cache::NoopCache;
pub use redis_cache::RedisCacheService;
pub use user_cache::{UserCache, USER_TTL};
