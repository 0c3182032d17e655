//! In-memory cache implementation with LRU eviction.
//!
//! Provides a thread-safe in-memory cache using tokio synchronization
//! primitives and an LRU eviction policy. Counters follow the same rules as
//! the Redis backend: they are stored as decimal text and an absent counter
//! starts from 0.

use std::num::NonZeroUsize;
use std::sync::Arc;

use async_trait::async_trait;
use lru::LruCache;
use tokio::sync::RwLock;

use newscache_core::cache::{decode_counter, encode_counter, CacheError, KeyValueCache, Result};

/// In-memory cache implementation with LRU eviction.
///
/// Thread-safe cache using `Arc<RwLock<LruCache>>` for concurrent access.
/// Cloning shares the underlying store.
#[derive(Debug, Clone)]
pub struct MemoryCache {
    store: Arc<RwLock<LruCache<String, Vec<u8>>>>,
}

impl MemoryCache {
    /// Creates a new in-memory cache with LRU eviction.
    ///
    /// # Arguments
    ///
    /// * `max_entries` - Maximum number of entries before LRU eviction kicks in.
    ///
    /// # Panics
    ///
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).expect("max_entries must be > 0");
        Self {
            store: Arc::new(RwLock::new(LruCache::new(capacity))),
        }
    }

    /// Adds `delta` to the counter at `key` under a single write lock.
    async fn adjust(&self, key: &str, delta: i64) -> Result<i64> {
        let mut store = self.store.write().await;

        let current = match store.get(key) {
            Some(bytes) => decode_counter(bytes).map_err(|_| {
                CacheError::OperationFailed(format!("value at '{}' is not an integer", key))
            })?,
            None => 0,
        };
        let next = current.checked_add(delta).ok_or_else(|| {
            CacheError::OperationFailed(format!("counter at '{}' would overflow", key))
        })?;

        store.put(key.to_string(), encode_counter(next));
        Ok(next)
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // `LruCache::get` updates recency, so it needs the write lock
        let mut store = self.store.write().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut store = self.store.write().await;
        store.put(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut store = self.store.write().await;
        store.pop(key);
        Ok(())
    }

    async fn increment(&self, key: &str, by: i64) -> Result<i64> {
        self.adjust(key, by).await
    }

    async fn decrement(&self, key: &str, by: i64) -> Result<i64> {
        let delta = by.checked_neg().ok_or_else(|| {
            CacheError::OperationFailed(format!("cannot decrement '{}' by {}", key, by))
        })?;
        self.adjust(key, delta).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Default max entries for tests
    const TEST_MAX_ENTRIES: usize = 1000;

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("news_1", b"value").await.unwrap();
        let result = cache.get("news_1").await.unwrap();

        assert_eq!(result, Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let result = cache.get("news_404").await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("news_page_1", b"[]").await.unwrap();
        cache.delete("news_page_1").await.unwrap();

        assert!(cache.get("news_page_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        assert!(cache.delete("news_page_9").await.is_ok());
    }

    #[tokio::test]
    async fn test_overwrite_value() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        cache.set("countNews", b"1").await.unwrap();
        cache.set("countNews", b"2").await.unwrap();

        assert_eq!(cache.get("countNews").await.unwrap(), Some(b"2".to_vec()));
    }

    #[tokio::test]
    async fn test_increment_existing_counter() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        cache.set("countNews", b"40").await.unwrap();

        let value = cache.increment("countNews", 1).await.unwrap();

        assert_eq!(value, 41);
        assert_eq!(cache.get("countNews").await.unwrap(), Some(b"41".to_vec()));
    }

    #[tokio::test]
    async fn test_increment_absent_counter_starts_at_zero() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);

        let value = cache.increment("countNews", 3).await.unwrap();

        assert_eq!(value, 3);
    }

    #[tokio::test]
    async fn test_decrement_counter() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        cache.set("countNews", b"5").await.unwrap();

        assert_eq!(cache.decrement("countNews", 1).await.unwrap(), 4);
        assert_eq!(cache.decrement("countNews", 4).await.unwrap(), 0);
        assert_eq!(cache.get("countNews").await.unwrap(), Some(b"0".to_vec()));
    }

    #[tokio::test]
    async fn test_increment_non_integer_fails() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        cache.set("news_1", b"{\"id\":1}").await.unwrap();

        let result = cache.increment("news_1", 1).await;

        assert!(matches!(result, Err(CacheError::OperationFailed(_))));
        // The value is left untouched
        assert_eq!(
            cache.get("news_1").await.unwrap(),
            Some(b"{\"id\":1}".to_vec())
        );
    }

    #[tokio::test]
    async fn test_increment_overflow_fails() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        cache
            .set("countNews", i64::MAX.to_string().as_bytes())
            .await
            .unwrap();

        let result = cache.increment("countNews", 1).await;

        assert!(matches!(result, Err(CacheError::OperationFailed(_))));
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let cache = MemoryCache::new(TEST_MAX_ENTRIES);
        let other = cache.clone();

        cache.set("maxCachedPage", b"2").await.unwrap();

        assert_eq!(
            other.get("maxCachedPage").await.unwrap(),
            Some(b"2".to_vec())
        );
    }

    #[tokio::test]
    async fn test_lru_eviction() {
        // Create a cache with only 3 entries max
        let cache = MemoryCache::new(3);

        cache.set("key1", b"value1").await.unwrap();
        cache.set("key2", b"value2").await.unwrap();
        cache.set("key3", b"value3").await.unwrap();

        // Access key1 to make it recently used
        cache.get("key1").await.unwrap();

        // Insert a 4th entry - should evict key2 (least recently used)
        cache.set("key4", b"value4").await.unwrap();

        assert!(cache.get("key1").await.unwrap().is_some());
        assert!(cache.get("key2").await.unwrap().is_none());
        assert!(cache.get("key3").await.unwrap().is_some());
        assert!(cache.get("key4").await.unwrap().is_some());
    }

    #[tokio::test]
    #[should_panic(expected = "max_entries must be > 0")]
    async fn test_zero_max_entries_panics() {
        let _ = MemoryCache::new(0);
    }
}
