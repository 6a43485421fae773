//! Redis caching layer for the portfolio backend
//!
//! Provides a consistent caching strategy for public content reads:
//! - Unified key schema with versioning
//! - Negative caching (cache miss sentinel)
//! - SCAN-based pattern invalidation (no blocking KEYS)
//! - Pipeline support for batch deletes

mod error;
mod keys;

pub use error::{CacheError, CacheResult};
pub use keys::{CacheKey, CACHE_VERSION};

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Pipeline};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Shared Redis connection manager
pub type SharedRedis = Arc<Mutex<ConnectionManager>>;

/// Cache miss sentinel value - used for negative caching
pub const CACHE_MISS_SENTINEL: &str = "__portfolio_cache_miss__";

/// Default TTL values (seconds)
pub mod ttl {
    pub const PROJECTS: u64 = 3600; // 1 hour
    pub const SKILLS: u64 = 3600; // 1 hour
    pub const SECTIONS: u64 = 3600; // 1 hour
    pub const BLOGS: u64 = 600; // 10 minutes
    pub const NEGATIVE: u64 = 60; // 1 minute for cache miss
}

/// Core cache operations trait
#[async_trait::async_trait]
pub trait CacheOperations: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> CacheResult<Option<T>>;

    /// Set a value in cache with TTL
    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> CacheResult<()>;

    /// Delete a key from cache
    async fn del(&self, key: &str) -> CacheResult<()>;

    /// Set negative cache (cache miss marker)
    async fn set_negative(&self, key: &str) -> CacheResult<()>;

    /// Check if value is negative cache
    fn is_negative_cache(value: &str) -> bool {
        value == CACHE_MISS_SENTINEL
    }

    /// Batch delete using SCAN (non-blocking)
    async fn scan_del(&self, pattern: &str) -> CacheResult<usize>;
}

/// Portfolio cache client implementation
#[derive(Clone)]
pub struct PortfolioCache {
    redis: SharedRedis,
}

impl PortfolioCache {
    pub fn new(redis: SharedRedis) -> Self {
        Self { redis }
    }

    pub fn with_manager(manager: ConnectionManager) -> Self {
        Self {
            redis: Arc::new(Mutex::new(manager)),
        }
    }

    /// Add jitter to TTL to prevent thundering herd
    fn add_jitter(ttl_secs: u64) -> u64 {
        let jitter_percent = (rand::random::<u32>() % 10) as f64 / 100.0;
        let jitter = (ttl_secs as f64 * jitter_percent).round() as u64;
        ttl_secs + jitter
    }

    /// Get raw string value (for checking negative cache)
    pub async fn get_raw(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.redis.lock().await;
        let result: Option<String> = conn.get(key).await.map_err(CacheError::Redis)?;
        Ok(result)
    }
}

#[async_trait::async_trait]
impl CacheOperations for PortfolioCache {
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.redis.lock().await;

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(data)) => {
                if Self::is_negative_cache(&data) {
                    debug!(key = %key, "Cache negative hit");
                    return Ok(None);
                }

                match serde_json::from_str::<T>(&data) {
                    Ok(value) => {
                        debug!(key = %key, "Cache hit");
                        Ok(Some(value))
                    }
                    Err(e) => {
                        warn!(key = %key, error = %e, "Cache deserialization failed");
                        // Delete corrupted cache entry
                        let _ = conn.del::<_, ()>(key).await;
                        Ok(None)
                    }
                }
            }
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                Ok(None)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Redis get error");
                Err(CacheError::Redis(e))
            }
        }
    }

    async fn set<T: Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> CacheResult<()> {
        let data = serde_json::to_string(value).map_err(CacheError::Serialization)?;
        let ttl_with_jitter = Self::add_jitter(ttl_secs);

        let mut conn = self.redis.lock().await;
        conn.set_ex::<_, _, ()>(key, data, ttl_with_jitter)
            .await
            .map_err(CacheError::Redis)?;

        debug!(key = %key, ttl = ttl_with_jitter, "Cache set");
        Ok(())
    }

    async fn del(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.redis.lock().await;
        conn.del::<_, ()>(key).await.map_err(CacheError::Redis)?;

        debug!(key = %key, "Cache delete");
        Ok(())
    }

    async fn set_negative(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.redis.lock().await;
        conn.set_ex::<_, _, ()>(key, CACHE_MISS_SENTINEL, ttl::NEGATIVE)
            .await
            .map_err(CacheError::Redis)?;

        debug!(key = %key, "Cache set negative");
        Ok(())
    }

    async fn scan_del(&self, pattern: &str) -> CacheResult<usize> {
        let mut conn = self.redis.lock().await;
        let mut cursor: u64 = 0;
        let mut total_deleted = 0;

        loop {
            // Use SCAN instead of KEYS to avoid blocking
            let (next_cursor, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(100)
                .query_async(&mut *conn)
                .await
                .map_err(CacheError::Redis)?;

            if !keys.is_empty() {
                // Use pipeline for batch delete
                let mut pipe = Pipeline::new();
                for key in &keys {
                    pipe.del(key);
                }
                pipe.query_async::<_, ()>(&mut *conn)
                    .await
                    .map_err(CacheError::Redis)?;

                total_deleted += keys.len();
            }

            cursor = next_cursor;
            if cursor == 0 {
                break;
            }
        }

        debug!(pattern = %pattern, deleted = total_deleted, "Cache scan delete");
        Ok(total_deleted)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_negative_cache() {
        assert!(PortfolioCache::is_negative_cache(CACHE_MISS_SENTINEL));
        assert!(!PortfolioCache::is_negative_cache("some_value"));
    }

    #[test]
    fn test_add_jitter() {
        let ttl = 300u64;
        let with_jitter = PortfolioCache::add_jitter(ttl);
        // Jitter should be 0-10% of TTL
        assert!(with_jitter >= ttl);
        assert!(with_jitter <= ttl + (ttl / 10));
    }
}
