//! Cached news repository.

use std::num::NonZeroU32;
use std::sync::Arc;

use newscache_core::cache::{
    decode_counter, deserialize_page, deserialize_snapshot, encode_counter, news_details_key,
    news_page_key, serialize_page, serialize_snapshot, KeyValueCache, COUNT_NEWS_KEY,
};
use newscache_core::news::{
    page_offset, validate_news, validate_page, NewsError, NewsItem, NewsSnapshot,
};
use newscache_core::storage::NewsStore;

use super::error::Result;
use super::page_index::PageCacheIndex;

/// Number of news items per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(5) {
    Some(size) => size,
    None => panic!("default page size must be non-zero"),
};

/// News repository with page, detail and count caching.
///
/// Writes go to the store first. Once the store reports success the cache
/// is brought back in line; cache failures at that point are logged and
/// ignored, so the caller only sees errors from validation or the store.
///
/// # Type Parameters
///
/// * `S` - The store holding the news rows
/// * `C` - The cache shared with every other process serving the same rows
pub struct NewsRepository<S, C>
where
    S: NewsStore,
    C: KeyValueCache,
{
    store: Arc<S>,
    cache: Arc<C>,
    pages: PageCacheIndex<C>,
    page_size: NonZeroU32,
}

impl<S, C> NewsRepository<S, C>
where
    S: NewsStore,
    C: KeyValueCache,
{
    /// Creates a new repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The store to persist news in
    /// * `cache` - The cache to keep pages, details and the count in
    /// * `page_size` - Number of items per page
    pub fn new(store: Arc<S>, cache: Arc<C>, page_size: NonZeroU32) -> Self {
        Self {
            pages: PageCacheIndex::new(Arc::clone(&cache)),
            store,
            cache,
            page_size,
        }
    }

    /// Returns the number of items per page.
    pub fn page_size(&self) -> NonZeroU32 {
        self.page_size
    }

    /// Inserts or updates a news item.
    ///
    /// An item without an identifier is inserted: its creation time is set to
    /// now and it receives the identifier generated by the store. An item with
    /// an identifier is updated in place.
    ///
    /// Returns `false` when an update matched no row; the cache is not
    /// touched in that case.
    pub async fn save(&self, item: &mut NewsItem) -> Result<bool> {
        validate_news(item)?;

        match item.id() {
            None => self.create(item).await,
            Some(id) => self.update(item, id).await,
        }
    }

    async fn create(&self, item: &mut NewsItem) -> Result<bool> {
        item.stamp_create_time();
        let id = self.store.insert_news(item).await?;
        item.assign_id(id);

        self.adjust_count(1).await;
        self.invalidate_pages().await;
        self.cache_details(id, item).await;

        tracing::debug!(news_id = id, "Created news");
        Ok(true)
    }

    async fn update(&self, item: &NewsItem, id: i64) -> Result<bool> {
        let rows = self.store.update_news(item).await?;
        if rows == 0 {
            tracing::debug!(news_id = id, "Update matched no news row");
            return Ok(false);
        }

        self.invalidate_pages().await;
        self.cache_details(id, item).await;

        tracing::debug!(news_id = id, "Updated news");
        Ok(true)
    }

    /// Deletes a persisted news item.
    ///
    /// On success the item is reset to the unpersisted state, so saving it
    /// again inserts a new row. Returns `false` when no row matched; the item
    /// and the cache are left as they were.
    pub async fn delete(&self, item: &mut NewsItem) -> Result<bool> {
        let id = item.id().ok_or(NewsError::MissingId)?;

        let rows = self.store.delete_news(id).await?;
        if rows == 0 {
            tracing::debug!(news_id = id, "Delete matched no news row");
            return Ok(false);
        }

        self.evict(&news_details_key(id)).await;
        item.reset();
        self.adjust_count(-1).await;
        self.invalidate_pages().await;

        tracing::debug!(news_id = id, "Deleted news");
        Ok(true)
    }

    /// Loads a news item straight from the store, bypassing the cache.
    pub async fn find_by_pk(&self, id: i64) -> Result<Option<NewsItem>> {
        Ok(self.store.find_news(id).await?.map(NewsItem::from))
    }

    /// Returns one page of news, newest first.
    ///
    /// The page is recorded in the page index even when it is served from
    /// the cache.
    pub async fn get_news_by_page(&self, page: u32) -> Result<Vec<NewsSnapshot>> {
        validate_page(page)?;

        if let Err(err) = self.pages.check_max_cached_page(page).await {
            tracing::warn!(page, error = %err, "Failed to record cached page");
        }

        let cache_key = news_page_key(page);

        match self.cache.get(&cache_key).await {
            Ok(Some(bytes)) => match deserialize_page(&bytes) {
                Ok(rows) => {
                    tracing::trace!(page, count = rows.len(), "Cache hit for news page");
                    return Ok(rows);
                }
                Err(err) => {
                    tracing::warn!(page, error = %err, "Cached news page deserialization failed");
                }
            },
            Ok(None) => {}
            Err(err) => tracing::warn!(page, error = %err, "Failed to read cached news page"),
        }

        tracing::trace!(page, "Cache miss for news page");
        let page_size = self.page_size.get();
        let rows = self
            .store
            .list_news(page_offset(page, page_size), u64::from(page_size))
            .await?;

        if rows.is_empty() && page > 1 {
            tracing::warn!(
                page,
                "Requested page is past the last news row; the next write sweeps every page up to it"
            );
        }

        match serialize_page(&rows) {
            Ok(bytes) => self.put(&cache_key, &bytes).await,
            Err(err) => tracing::warn!(page, error = %err, "Failed to serialize news page"),
        }

        Ok(rows)
    }

    /// Returns the details of one news item.
    ///
    /// With `regenerate` set, the cached entry is dropped first so the row is
    /// read from the store. Rows that do not exist are not cached.
    pub async fn get_news_details(&self, id: i64, regenerate: bool) -> Result<Option<NewsSnapshot>> {
        let cache_key = news_details_key(id);

        if regenerate {
            self.evict(&cache_key).await;
        } else {
            match self.cache.get(&cache_key).await {
                Ok(Some(bytes)) => match deserialize_snapshot(&bytes) {
                    Ok(snapshot) => {
                        tracing::trace!(news_id = id, "Cache hit for news details");
                        return Ok(Some(snapshot));
                    }
                    Err(err) => tracing::warn!(
                        news_id = id,
                        error = %err,
                        "Cached news details deserialization failed"
                    ),
                },
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(news_id = id, error = %err, "Failed to read cached news details")
                }
            }
        }

        tracing::trace!(news_id = id, "Cache miss for news details");
        let snapshot = self.store.find_news(id).await?;

        if let Some(ref s) = snapshot {
            match serialize_snapshot(s) {
                Ok(bytes) => self.put(&cache_key, &bytes).await,
                Err(err) => {
                    tracing::warn!(news_id = id, error = %err, "Failed to serialize news details")
                }
            }
        }

        Ok(snapshot)
    }

    /// Makes sure the cached count is populated and returns it.
    ///
    /// With `regenerate` set, the cached count is dropped and recomputed.
    /// A cached count of zero is a valid value and is returned as is.
    pub async fn warm_count_cache(&self, regenerate: bool) -> Result<u64> {
        self.warm_count(regenerate).await.map(|(count, _)| count)
    }

    /// Returns the count and whether it was already cached.
    async fn warm_count(&self, regenerate: bool) -> Result<(u64, bool)> {
        if regenerate {
            self.cache.delete(COUNT_NEWS_KEY).await?;
        }

        if let Some(bytes) = self.cache.get(COUNT_NEWS_KEY).await? {
            match decode_counter(&bytes).map(u64::try_from) {
                Ok(Ok(count)) => {
                    tracing::trace!(count, "Cache hit for news count");
                    return Ok((count, true));
                }
                _ => tracing::warn!("Ignoring unreadable cached news count"),
            }
        }

        let count = self.store.count_news().await?;
        let cached = i64::try_from(count).unwrap_or(i64::MAX);
        self.cache
            .set(COUNT_NEWS_KEY, &encode_counter(cached))
            .await?;

        tracing::trace!(count, "Cached news count");
        Ok((count, false))
    }

    /// Warms the count, then moves it by `delta`.
    ///
    /// Runs after the store write. A count recomputed while warming already
    /// includes that write and is left as is. Nothing is adjusted when the
    /// count could not be warmed, so a missing counter is never started from
    /// zero.
    async fn adjust_count(&self, delta: i64) {
        match self.warm_count(false).await {
            Ok((_, true)) => {}
            Ok((count, false)) => {
                tracing::trace!(count, "News count recomputed after write");
                return;
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to warm news count cache");
                return;
            }
        }

        let adjusted = if delta >= 0 {
            self.cache.increment(COUNT_NEWS_KEY, delta).await
        } else {
            self.cache.decrement(COUNT_NEWS_KEY, -delta).await
        };

        match adjusted {
            Ok(count) => tracing::trace!(count, "Adjusted cached news count"),
            Err(err) => tracing::warn!(error = %err, "Failed to adjust cached news count"),
        }
    }

    async fn invalidate_pages(&self) {
        if let Err(err) = self.pages.clear_page_cache().await {
            tracing::warn!(error = %err, "Failed to clear news page cache");
        }
    }

    async fn cache_details(&self, id: i64, item: &NewsItem) {
        let cache_key = news_details_key(id);

        // Without a creation time there is nothing complete to cache.
        let Some(snapshot) = item.snapshot() else {
            self.evict(&cache_key).await;
            return;
        };

        match serialize_snapshot(&snapshot) {
            Ok(bytes) => self.put(&cache_key, &bytes).await,
            Err(err) => {
                tracing::warn!(news_id = id, error = %err, "Failed to serialize news details");
                self.evict(&cache_key).await;
            }
        }
    }

    async fn put(&self, key: &str, bytes: &[u8]) {
        if let Err(err) = self.cache.set(key, bytes).await {
            tracing::warn!(key, error = %err, "Failed to write cache entry");
        }
    }

    async fn evict(&self, key: &str) {
        if let Err(err) = self.cache.delete(key).await {
            tracing::warn!(key, error = %err, "Failed to delete cache entry");
        }
    }
}
