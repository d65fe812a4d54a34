//! # Roster Repository
//!
//! Data access hierarchy:
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>   (repository interface)
//! UserRepositoryImpl              plain: store only
//! CachedUserRepository            cache-aside: store + cache
//!   ↓  Arc<dyn UserDao>          ↘ Arc<dyn CacheInterface>
//! PgUserDao                        RedisCache
//!   ↓                                ↓
//! PostgreSQL                       Redis
//! ```
//!
//! ## Structure
//!
//! ```text
//! src/
//!   traits.rs                      ← UserRepository trait
//!   pool.rs                        ← DatabasePool
//!   impl/
//!     user_repository_impl.rs      ← UserRepositoryImpl
//!     cached_user_repository.rs    ← CachedUserRepository
//!   cache/
//!     cache_interface.rs           ← CacheInterface, CacheExt
//!     cache_keys.rs                ← key naming
//!     redis_cache.rs               ← RedisCache
//!   dao/
//!     user_dao.rs                  ← UserDao trait
//!     impl/postgres/
//!       user_dao_impl.rs           ← PgUserDao
//! ```

pub mod cache;
pub mod dao;
pub mod pool;
pub mod traits;
pub mod r#impl;

pub use cache::{cache_keys, CacheExt, CacheInterface, RedisCache};
pub use dao::{PgUserDao, UserDao};
pub use pool::*;
pub use r#impl::cached_user_repository::{CACHE_ERRORS_TOTAL, CACHE_HITS_TOTAL, CACHE_MISSES_TOTAL};
pub use r#impl::{CachedUserRepository, UserRepositoryImpl};
pub use traits::*;
