//! News repository with page, detail and count caching.
//!
//! The repository writes to a [`NewsStore`](newscache_core::storage::NewsStore)
//! first and then brings a [`KeyValueCache`](newscache_core::cache::KeyValueCache)
//! back in line:
//!
//! - **Reads**: check the cache, on miss query the store and populate the cache
//! - **Writes**: persist, adjust the cached count, sweep every tracked page,
//!   refresh or drop the detail entry
//!
//! The cache has no delete-by-prefix primitive, so `PageCacheIndex` keeps
//! the highest requested page number under its own key and uses it to bound
//! the invalidation sweep.

mod error;
mod news;
mod page_index;

#[cfg(test)]
mod test_support;

pub use error::NewsRepositoryError;
pub use news::{NewsRepository, DEFAULT_PAGE_SIZE};
