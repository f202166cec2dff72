//! Dependency wiring.
//!
//! The container owns one production implementation per seam:
//! - `DatabasePool` and `PgUserRepository` behind the persistence gateway
//! - `RedisCacheService`, or `NoopCache` when Redis is disabled or unreachable
//! - `UserServiceImpl` for the business rules

use roster_config::{AppConfig, RedisConfig};
use roster_core::{HealthCheck, RosterResult};
use roster_repository::{create_pool, DatabasePoolInterface, PgUserRepository, UserRepository};
use roster_rest::AppState;
use roster_service::{CacheInterface, NoopCache, RedisCacheService, UserService, UserServiceImpl};
use std::sync::Arc;
use tracing::{info, warn};

/// Resolved application components.
#[derive(Clone)]
pub struct AppContainer {
    database_pool: Arc<dyn DatabasePoolInterface>,
    user_repository: Arc<dyn UserRepository>,
    cache: Arc<dyn CacheInterface>,
    user_service: Arc<dyn UserService>,
    health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppContainer {
    /// Connects to the database and cache, runs migrations and wires services.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let pool = create_pool(&config.database).await?;
        pool.run_migrations().await?;

        let (cache, cache_health) = connect_cache(&config.redis).await;
        let pool_health: Arc<dyn HealthCheck> = pool.clone();
        info!(cache_enabled = cache.is_enabled(), "Infrastructure connected");

        Ok(Self::from_parts(pool, cache, vec![pool_health, cache_health]))
    }

    /// Wires services over already-created infrastructure.
    pub fn from_parts(
        database_pool: Arc<dyn DatabasePoolInterface>,
        cache: Arc<dyn CacheInterface>,
        health_checks: Vec<Arc<dyn HealthCheck>>,
    ) -> Self {
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(PgUserRepository::new(database_pool.clone()));
        let user_service: Arc<dyn UserService> =
            Arc::new(UserServiceImpl::new(user_repository.clone(), cache.clone()));

        Self {
            database_pool,
            user_repository,
            cache,
            user_service,
            health_checks,
        }
    }

    pub fn database_pool(&self) -> Arc<dyn DatabasePoolInterface> {
        self.database_pool.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn cache(&self) -> Arc<dyn CacheInterface> {
        self.cache.clone()
    }

    pub fn user_service(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    /// Builds the REST state with every registered health check.
    pub fn app_state(&self) -> AppState {
        self.health_checks
            .iter()
            .cloned()
            .fold(AppState::new(self.user_service()), AppState::with_health_check)
    }
}

/// Connects the cache, falling back to [`NoopCache`] when Redis is disabled
/// or unreachable.
///
/// Returns the cache together with the health check reporting on it.
pub async fn connect_cache(
    config: &RedisConfig,
) -> (Arc<dyn CacheInterface>, Arc<dyn HealthCheck>) {
    if !config.enabled {
        info!("Redis cache disabled, reading through to the database");
        return noop_cache();
    }

    match RedisCacheService::connect(config).await {
        Ok(service) => {
            info!("Connected to Redis cache");
            let service = Arc::new(service);
            (service.clone(), service)
        }
        Err(e) => {
            warn!("Redis unavailable, continuing without cache: {}", e);
            noop_cache()
        }
    }
}

fn noop_cache() -> (Arc<dyn CacheInterface>, Arc<dyn HealthCheck>) {
    let cache = Arc::new(NoopCache::new());
    (cache.clone(), cache)
}
