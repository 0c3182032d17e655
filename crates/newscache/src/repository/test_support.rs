//! Test doubles shared by the repository tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use newscache_core::cache::{
    decode_counter, encode_counter, CacheError, KeyValueCache, Result as CacheResult,
};
use newscache_core::news::{NewsItem, NewsSnapshot};
use newscache_core::storage::{NewsStore, RepositoryError, Result};

use crate::storage::InMemoryNewsStore;

/// Cache backed by a HashMap that counts calls and can be switched off.
#[derive(Default)]
pub struct RecordingCache {
    pub store: RwLock<HashMap<String, Vec<u8>>>,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    /// Key and resulting value of every increment or decrement, in order.
    pub adjustments: std::sync::Mutex<Vec<(String, i64)>>,
    pub fail: AtomicBool,
    pub fail_reads: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// Fails only `get`, leaving writes and counters working.
    pub fn set_failing_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub async fn contains(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    pub async fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.store.read().await.get(key).cloned()
    }

    pub async fn counter(&self, key: &str) -> Option<i64> {
        self.raw(key)
            .await
            .map(|bytes| decode_counter(&bytes).expect("counter should decode"))
    }

    pub fn adjustments(&self) -> Vec<(String, i64)> {
        self.adjustments.lock().expect("lock poisoned").clone()
    }

    pub async fn put(&self, key: &str, value: &[u8]) {
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
    }

    fn check(&self) -> CacheResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache is down".to_string()));
        }
        Ok(())
    }

    async fn adjust(&self, key: &str, delta: i64) -> CacheResult<i64> {
        self.check()?;
        let mut store = self.store.write().await;
        let current = match store.get(key) {
            Some(bytes) => decode_counter(bytes)?,
            None => 0,
        };
        store.insert(key.to_string(), encode_counter(current + delta));
        self.adjustments
            .lock()
            .expect("lock poisoned")
            .push((key.to_string(), current + delta));
        Ok(current + delta)
    }
}

#[async_trait]
impl KeyValueCache for RecordingCache {
    async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionFailed("cache reads are down".to_string()));
        }
        Ok(self.store.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> CacheResult<()> {
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.put(key, value).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn increment(&self, key: &str, by: i64) -> CacheResult<i64> {
        self.adjust(key, by).await
    }

    async fn decrement(&self, key: &str, by: i64) -> CacheResult<i64> {
        self.adjust(key, -by).await
    }
}

/// Store that delegates to an in-memory store and records every call.
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryNewsStore,
    pub insert_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub find_calls: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
    pub last_list: std::sync::Mutex<Option<(u64, u64)>>,
    pub fail: AtomicBool,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn calls(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn last_list(&self) -> Option<(u64, u64)> {
        *self.last_list.lock().expect("lock poisoned")
    }

    /// Inserts a row directly, bypassing any repository.
    pub async fn seed(&self, title: &str, create_time: i64) -> i64 {
        let mut item = NewsItem::new(title);
        item.create_time = Some(create_time);
        self.inner.insert_news(&item).await.expect("seed insert")
    }

    fn check(&self) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::ConnectionFailed(
                "store is down".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl NewsStore for CountingStore {
    async fn insert_news(&self, item: &NewsItem) -> Result<i64> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.insert_news(item).await
    }

    async fn update_news(&self, item: &NewsItem) -> Result<u64> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.update_news(item).await
    }

    async fn delete_news(&self, id: i64) -> Result<u64> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.delete_news(id).await
    }

    async fn find_news(&self, id: i64) -> Result<Option<NewsSnapshot>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.find_news(id).await
    }

    async fn list_news(&self, offset: u64, limit: u64) -> Result<Vec<NewsSnapshot>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_list.lock().expect("lock poisoned") = Some((offset, limit));
        self.check()?;
        self.inner.list_news(offset, limit).await
    }

    async fn count_news(&self) -> Result<u64> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.inner.count_news().await
    }
}
