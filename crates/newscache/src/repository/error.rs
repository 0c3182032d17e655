use thiserror::Error;

use newscache_core::cache::CacheError;
use newscache_core::news::NewsError;
use newscache_core::storage::RepositoryError;

/// Errors returned by [`NewsRepository`](super::NewsRepository) operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NewsRepositoryError {
    /// The request was rejected before any I/O.
    #[error(transparent)]
    News(#[from] NewsError),
    /// The store failed; the cache was left untouched.
    #[error(transparent)]
    Store(#[from] RepositoryError),
    /// The cache failed during an explicit cache operation.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, NewsRepositoryError>;
