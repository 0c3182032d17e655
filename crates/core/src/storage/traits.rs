use async_trait::async_trait;

use crate::news::{NewsItem, NewsSnapshot};

use super::Result;

/// Relational store for news rows.
#[async_trait]
pub trait NewsStore: Send + Sync {
    /// Inserts a new row and returns the identifier generated by the store.
    async fn insert_news(&self, item: &NewsItem) -> Result<i64>;

    /// Updates title and description of an existing row.
    ///
    /// Returns the number of affected rows.
    async fn update_news(&self, item: &NewsItem) -> Result<u64>;

    /// Deletes a row by its identifier and returns the number of affected rows.
    async fn delete_news(&self, id: i64) -> Result<u64>;

    /// Gets a row by its identifier.
    async fn find_news(&self, id: i64) -> Result<Option<NewsSnapshot>>;

    /// Lists at most `limit` rows starting at `offset`, newest first.
    async fn list_news(&self, offset: u64, limit: u64) -> Result<Vec<NewsSnapshot>>;

    /// Counts all rows.
    async fn count_news(&self) -> Result<u64>;
}
