//! Dependency injection module using Shaku.
//!
//! Two modules share every component except the repository:
//! - `StoreModule`: the service reads and writes PostgreSQL directly
//! - `CachedStoreModule`: the service goes through the cache-aside repository
//!
//! `redis.enabled` picks one at startup.

use roster_config::{DatabaseConfig, RedisConfig};
use roster_core::RosterResult;
use roster_repository::{
    CachedUserRepository, DatabasePool, DatabasePoolInterface, PgUserDao, RedisCache,
    UserRepositoryImpl,
};
use roster_service::{UserService, UserServiceImpl};
use shaku::{module, HasComponent};
use std::sync::Arc;
use tracing::info;

// ============================================================================
// Shaku Module Definitions
// ============================================================================

module! {
    pub StoreModule {
        components = [
            DatabasePool,
            PgUserDao,
            UserRepositoryImpl,
            UserServiceImpl,
        ],
        providers = [],
    }
}

module! {
    pub CachedStoreModule {
        components = [
            DatabasePool,
            PgUserDao,
            RedisCache,
            CachedUserRepository,
            UserServiceImpl,
        ],
        providers = [],
    }
}

// ============================================================================
// Module Builders
// ============================================================================

/// Builds the plain store module around an established pool.
#[must_use]
pub fn build_store_module(pool: DatabasePool) -> Arc<StoreModule> {
    let module = StoreModule::builder()
        .with_component_parameters::<DatabasePool>(pool.into_parameters())
        .build();

    Arc::new(module)
}

/// Builds the cached store module around an established pool and cache.
#[must_use]
pub fn build_cached_store_module(pool: DatabasePool, cache: RedisCache) -> Arc<CachedStoreModule> {
    let module = CachedStoreModule::builder()
        .with_component_parameters::<DatabasePool>(pool.into_parameters())
        .with_component_parameters::<RedisCache>(cache.into_parameters())
        .build();

    Arc::new(module)
}

/// The wired module, whichever variant the configuration selected.
#[derive(Clone)]
pub enum AppModule {
    Store(Arc<StoreModule>),
    CachedStore(Arc<CachedStoreModule>),
}

impl AppModule {
    /// Connects to the store and wires the variant selected by `redis.enabled`.
    pub async fn connect(database: &DatabaseConfig, redis: &RedisConfig) -> RosterResult<Self> {
        let pool = DatabasePool::new(database).await?;

        if redis.enabled {
            let cache = RedisCache::from_config(redis)?;
            info!(ttl = ?redis.entry_ttl(), "Using cache-aside repository");
            Ok(Self::CachedStore(build_cached_store_module(pool, cache)))
        } else {
            info!("Using store-only repository");
            Ok(Self::Store(build_store_module(pool)))
        }
    }

    /// Returns `true` if reads go through the cache.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        matches!(self, Self::CachedStore(_))
    }

    /// Resolves the user service.
    #[must_use]
    pub fn user_service(&self) -> Arc<dyn UserService> {
        match self {
            Self::Store(module) => module.resolve(),
            Self::CachedStore(module) => module.resolve(),
        }
    }

    /// Resolves the database pool.
    #[must_use]
    pub fn database(&self) -> Arc<dyn DatabasePoolInterface> {
        match self {
            Self::Store(module) => module.resolve(),
            Self::CachedStore(module) => module.resolve(),
        }
    }
}

impl std::fmt::Debug for AppModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppModule")
            .field("cached", &self.is_cached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_repository::UserRepository;
    use sqlx::postgres::PgPoolOptions;

    fn lazy_pool() -> DatabasePool {
        let pool = PgPoolOptions::new()
            .connect_lazy(&DatabaseConfig::default().url)
            .unwrap();
        DatabasePool::with_pool(pool)
    }

    #[tokio::test]
    async fn test_store_module_wires_all_components() {
        let module = build_store_module(lazy_pool());

        let _: Arc<dyn UserRepository> = module.resolve();
        let _: Arc<dyn UserService> = module.resolve();
        let _: Arc<dyn DatabasePoolInterface> = module.resolve();
    }

    #[tokio::test]
    async fn test_cached_store_module_wires_all_components() {
        let cache = RedisCache::from_config(&RedisConfig::default()).unwrap();
        let module = build_cached_store_module(lazy_pool(), cache);

        let _: Arc<dyn UserRepository> = module.resolve();
        let _: Arc<dyn UserService> = module.resolve();
    }

    #[tokio::test]
    async fn test_app_module_variants() {
        let plain = AppModule::Store(build_store_module(lazy_pool()));
        assert!(!plain.is_cached());

        let cache = RedisCache::from_config(&RedisConfig::default()).unwrap();
        let cached = AppModule::CachedStore(build_cached_store_module(lazy_pool(), cache));
        assert!(cached.is_cached());
        let _ = cached.user_service();
        let _ = cached.database();
    }
}
