//! Integration tests for `RedisCache`.
//!
//! These tests run against a real Redis server using testcontainers.
//! Requires Docker to be available on the system.

use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use roster_repository::{CacheInterface, RedisCache};
use std::sync::Arc;
use std::time::Duration;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::redis::Redis;

/// Redis container together with a pool pointed at it.
struct TestRedis {
    _container: ContainerAsync<Redis>,
    pool: Arc<Pool>,
}

impl TestRedis {
    async fn new() -> Self {
        let container = Redis::default()
            .start()
            .await
            .expect("Failed to start Redis container");

        let port = container
            .get_host_port_ipv4(6379)
            .await
            .expect("Failed to get Redis port");

        let pool = Config::from_url(format!("redis://127.0.0.1:{}", port))
            .create_pool(Some(Runtime::Tokio1))
            .expect("Failed to create Redis pool");

        Self {
            _container: container,
            pool: Arc::new(pool),
        }
    }

    fn cache(&self, entry_ttl: Option<Duration>) -> RedisCache {
        RedisCache::with_ttl(self.pool.clone(), entry_ttl)
    }

    async fn ttl(&self, key: &str) -> i64 {
        let mut conn = self.pool.get().await.expect("Failed to get connection");
        conn.ttl(key).await.expect("Failed to read TTL")
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_set_get_delete() {
    let redis = TestRedis::new().await;
    let cache = redis.cache(None);

    assert_eq!(cache.get_raw("user_1").await.unwrap(), None);

    cache.set_raw("user_1", r#"{"id":1}"#).await.unwrap();
    assert_eq!(cache.get_raw("user_1").await.unwrap().as_deref(), Some(r#"{"id":1}"#));

    cache.set_raw("user_1", r#"{"id":1,"name":"Alice"}"#).await.unwrap();
    assert_eq!(
        cache.get_raw("user_1").await.unwrap().as_deref(),
        Some(r#"{"id":1,"name":"Alice"}"#)
    );

    assert!(cache.delete("user_1").await.unwrap());
    assert_eq!(cache.get_raw("user_1").await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_delete_missing_key_returns_false() {
    let redis = TestRedis::new().await;
    let cache = redis.cache(None);

    assert!(!cache.delete("user_404").await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_entries_without_ttl_never_expire() {
    let redis = TestRedis::new().await;
    let cache = redis.cache(None);

    cache.set_raw("user_1", "{}").await.unwrap();

    assert_eq!(redis.ttl("user_1").await, -1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_entry_ttl_is_applied() {
    let redis = TestRedis::new().await;
    let cache = redis.cache(Some(Duration::from_secs(60)));

    cache.set_raw("user_1", "{}").await.unwrap();

    let ttl = redis.ttl("user_1").await;
    assert!((1..=60).contains(&ttl), "unexpected ttl {ttl}");
}
