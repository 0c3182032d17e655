//! Cache key scheme for news entries.
//!
//! These names are shared with any other process reading the same cache, so
//! they must not change.

/// Key holding the cached total number of news rows.
pub const COUNT_NEWS_KEY: &str = "countNews";

/// Key holding the highest page number requested since the last invalidation.
pub const MAX_CACHED_PAGE_KEY: &str = "maxCachedPage";

/// Returns the cache key for the details of a single news item.
pub fn news_details_key(id: i64) -> String {
    format!("news_{}", id)
}

/// Returns the cache key for a page of news.
pub fn news_page_key(page: u32) -> String {
    format!("news_page_{}", page)
}
