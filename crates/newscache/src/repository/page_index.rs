//! Bookkeeping for cached news pages.
//!
//! The marker under [`MAX_CACHED_PAGE_KEY`] holds the highest page number
//! requested since the last sweep. Every cached page lies in `1..=marker`,
//! so a sweep only needs to visit that range.

use std::sync::Arc;

use newscache_core::cache::{
    decode_counter, encode_counter, news_page_key, KeyValueCache, Result, COUNT_NEWS_KEY,
    MAX_CACHED_PAGE_KEY,
};

/// Tracks which news pages may be cached and removes them on demand.
pub struct PageCacheIndex<C> {
    cache: Arc<C>,
}

impl<C> Clone for PageCacheIndex<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C: KeyValueCache> PageCacheIndex<C> {
    /// Creates an index over the given cache.
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Reads the marker.
    ///
    /// Returns `None` when the marker is absent, zero, or unreadable.
    pub async fn max_cached_page(&self) -> Result<Option<u32>> {
        let Some(bytes) = self.cache.get(MAX_CACHED_PAGE_KEY).await? else {
            return Ok(None);
        };

        match decode_counter(&bytes).map(u32::try_from) {
            Ok(Ok(0)) => Ok(None),
            Ok(Ok(page)) => Ok(Some(page)),
            _ => {
                tracing::warn!("Ignoring unreadable max cached page marker");
                Ok(None)
            }
        }
    }

    /// Records that `page` was requested, raising the marker if needed.
    ///
    /// The read and the write are separate cache operations; a concurrent
    /// caller may lower the marker in between. Page 0 is never recorded.
    ///
    /// The marker is not capped. The next [`clear_page_cache`] issues one
    /// cache read per page up to the marker, so recording page 1_000_000
    /// costs a million round trips on a networked cache.
    ///
    /// [`clear_page_cache`]: Self::clear_page_cache
    pub async fn check_max_cached_page(&self, page: u32) -> Result<()> {
        if page == 0 {
            return Ok(());
        }

        match self.max_cached_page().await? {
            Some(marker) if marker >= page => Ok(()),
            marker => {
                tracing::trace!(page, ?marker, "Raising max cached page marker");
                self.cache
                    .set(MAX_CACHED_PAGE_KEY, &encode_counter(i64::from(page)))
                    .await
            }
        }
    }

    /// Drops the cached count and every tracked page, then clears the marker.
    ///
    /// Returns the number of page entries that were removed.
    pub async fn clear_page_cache(&self) -> Result<u32> {
        self.cache.delete(COUNT_NEWS_KEY).await?;

        let mut removed = 0;
        if let Some(marker) = self.max_cached_page().await? {
            for page in 1..=marker {
                let key = news_page_key(page);
                if self.cache.get(&key).await?.is_some() {
                    self.cache.delete(&key).await?;
                    removed += 1;
                }
            }
            tracing::debug!(marker, removed, "Cleared news page cache");
        }

        self.cache.delete(MAX_CACHED_PAGE_KEY).await?;
        Ok(removed)
    }
}
