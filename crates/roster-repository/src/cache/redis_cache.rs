//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use roster_config::RedisConfig;
use roster_core::{RosterError, RosterResult};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Redis-based cache.
///
/// Entries are written without expiry unless an entry TTL is configured.
#[derive(Component)]
#[shaku(interface = CacheInterface)]
pub struct RedisCache {
    /// Redis connection pool.
    pool: Arc<Pool>,
    /// Expiry applied to every write, if any.
    entry_ttl: Option<Duration>,
}

impl RedisCache {
    /// Create a cache over `pool`; entries expire after `entry_ttl` when set.
    #[must_use]
    pub fn with_ttl(pool: Arc<Pool>, entry_ttl: Option<Duration>) -> Self {
        Self { pool, entry_ttl }
    }

    /// Build the connection pool and cache from configuration.
    ///
    /// Pool creation is lazy; an unreachable server surfaces on first use.
    pub fn from_config(config: &RedisConfig) -> RosterResult<Self> {
        info!("Creating Redis connection pool...");

        let pool = Config::from_url(&config.url)
            .builder()
            .map_err(|e| RosterError::Configuration(format!("Invalid Redis config: {}", e)))?
            .max_size(config.pool_size)
            .runtime(Runtime::Tokio1)
            .build()
            .map_err(|e| RosterError::Configuration(format!("Failed to create Redis pool: {}", e)))?;

        Ok(Self::with_ttl(Arc::new(pool), config.entry_ttl()))
    }

    /// Returns the shaku parameters that hand this cache to a module.
    #[must_use]
    pub fn into_parameters(self) -> RedisCacheParameters {
        RedisCacheParameters {
            pool: self.pool,
            entry_ttl: self.entry_ttl,
        }
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| RosterError::cache(format!("Failed to get Redis connection: {}", e)))
    }
}

#[async_trait]
impl CacheInterface for RedisCache {
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| RosterError::cache(format!("Failed to get key '{}': {}", key, e)))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> RosterResult<()> {
        let mut conn = self.get_conn().await?;

        match self.entry_ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                conn.set_ex::<_, _, ()>(key, value, ttl_secs).await
            }
            None => conn.set::<_, _, ()>(key, value).await,
        }
        .map_err(|e| RosterError::cache(format!("Failed to set key '{}': {}", key, e)))?;

        debug!("Cached key '{}'", key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| RosterError::cache(format!("Failed to delete key '{}': {}", key, e)))?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("entry_ttl", &self.entry_ttl)
            .finish_non_exhaustive()
    }
}
