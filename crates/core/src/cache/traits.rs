use async_trait::async_trait;

use super::Result;

/// Trait for key-value cache operations.
///
/// Only single-key operations are assumed to be atomic. Values are opaque
/// bytes; counters are stored as ASCII decimal text so that backends can
/// adjust them in place.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Gets a value from the cache by key.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Sets a value in the cache, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Deletes a value from the cache by key. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Adds `by` to the counter at `key` and returns the new value.
    ///
    /// An absent key counts from 0.
    async fn increment(&self, key: &str, by: i64) -> Result<i64>;

    /// Subtracts `by` from the counter at `key` and returns the new value.
    ///
    /// An absent key counts from 0.
    async fn decrement(&self, key: &str, by: i64) -> Result<i64>;
}
