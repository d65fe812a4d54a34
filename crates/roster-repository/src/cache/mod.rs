//! Cache layer in front of the record store.
//!
//! Holds JSON snapshots of user records keyed by identifier. The cache is
//! never authoritative; see [`crate::CachedUserRepository`] for the
//! consistency policy.

mod cache_interface;
pub mod cache_keys;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use redis_cache::{RedisCache, RedisCacheParameters};
