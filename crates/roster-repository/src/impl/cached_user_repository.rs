//! Cache-aside repository variant.
//!
//! ```text
//! Service
//!   ↓ Arc<dyn UserRepository>
//! CachedUserRepository ──→ Arc<dyn CacheInterface> ──→ Redis
//!   ↓ Arc<dyn UserDao>
//! PgUserDao ──→ PostgreSQL
//! ```
//!
//! The store is authoritative. Mutations go to the store first and only a
//! successful result is written through (or evicted); reads try the cache
//! first and repopulate it from the store on a miss. Cache failures never
//! change the outcome of a call: they are logged at `warn` and counted in
//! `roster_cache_errors_total`.

use crate::{
    cache::{cache_keys, CacheExt, CacheInterface},
    dao::UserDao,
    traits::UserRepository,
};
use async_trait::async_trait;
use roster_core::{NewUser, RosterResult, User, UserId};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, warn};

/// Counter for lookups answered from the cache.
pub const CACHE_HITS_TOTAL: &str = "roster_cache_hits_total";
/// Counter for lookups that fell through to the store.
pub const CACHE_MISSES_TOTAL: &str = "roster_cache_misses_total";
/// Counter for swallowed cache failures, labelled by `operation`.
pub const CACHE_ERRORS_TOTAL: &str = "roster_cache_errors_total";

/// Repository that keeps a cache in front of [`UserDao`].
#[derive(Component)]
#[shaku(interface = UserRepository)]
pub struct CachedUserRepository {
    #[shaku(inject)]
    user_dao: Arc<dyn UserDao>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
}

impl CachedUserRepository {
    /// Creates a cached repository over the given store and cache.
    #[must_use]
    pub fn new(user_dao: Arc<dyn UserDao>, cache: Arc<dyn CacheInterface>) -> Self {
        Self { user_dao, cache }
    }

    /// Writes the snapshot of `user`, swallowing cache failures.
    async fn store_in_cache(&self, user: &User) {
        let key = cache_keys::user_by_id(user.id);
        match self.cache.set(&key, user).await {
            Ok(()) => debug!(%key, "User was recorded in cache"),
            Err(e) => {
                warn!(%key, error = %e, "Couldn't record user in cache");
                metrics::counter!(CACHE_ERRORS_TOTAL, "operation" => "set").increment(1);
            }
        }
    }

    /// Evicts the snapshot for `id`, swallowing cache failures.
    async fn evict_from_cache(&self, id: UserId) {
        let key = cache_keys::user_by_id(id);
        match self.cache.delete(&key).await {
            Ok(existed) => debug!(%key, existed, "User was evicted from cache"),
            Err(e) => {
                warn!(%key, error = %e, "Couldn't delete user from cache");
                metrics::counter!(CACHE_ERRORS_TOTAL, "operation" => "delete").increment(1);
            }
        }
    }

    /// Looks up the snapshot for `id`. Errors and undecodable entries count as misses.
    async fn lookup_in_cache(&self, id: UserId) -> Option<User> {
        let key = cache_keys::user_by_id(id);
        match self.cache.get::<User>(&key).await {
            Ok(Some(user)) => {
                debug!(%key, "User was received from cache");
                metrics::counter!(CACHE_HITS_TOTAL).increment(1);
                Some(user)
            }
            Ok(None) => {
                debug!(%key, "User is not in cache");
                metrics::counter!(CACHE_MISSES_TOTAL).increment(1);
                None
            }
            Err(e) => {
                warn!(%key, error = %e, "Couldn't get user from cache");
                metrics::counter!(CACHE_ERRORS_TOTAL, "operation" => "get").increment(1);
                metrics::counter!(CACHE_MISSES_TOTAL).increment(1);
                None
            }
        }
    }
}

#[async_trait]
impl UserRepository for CachedUserRepository {
    async fn create(&self, user: &NewUser) -> RosterResult<User> {
        let created = self.user_dao.create(user).await?;
        self.store_in_cache(&created).await;
        Ok(created)
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        let updated = self.user_dao.update(user).await?;
        self.store_in_cache(&updated).await;
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> RosterResult<()> {
        self.user_dao.delete(id).await?;
        self.evict_from_cache(id).await;
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        if let Some(user) = self.lookup_in_cache(id).await {
            return Ok(user);
        }

        let user = self.user_dao.find_by_id(id).await?;
        self.store_in_cache(&user).await;
        Ok(user)
    }

    async fn find_all(&self) -> RosterResult<Vec<User>> {
        self.user_dao.find_all().await
    }
}

impl std::fmt::Debug for CachedUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedUserRepository").finish_non_exhaustive()
    }
}
