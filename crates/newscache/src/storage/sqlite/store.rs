//! SQLite store implementation.
//!
//! Implements `NewsStore` from `newscache_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use newscache_core::news::{NewsItem, NewsSnapshot};
use newscache_core::storage::{NewsStore, RepositoryError, Result};

use super::conversions::{count_to_u64, row_to_snapshot, to_sql_int};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

const ENTITY: &str = "News";

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based news store.
///
/// Owns a single connection running on a background thread. Call
/// [`SqliteNewsStore::close`] to release it and surface any close error;
/// dropping the store also closes the connection.
pub struct SqliteNewsStore {
    conn: Connection,
}

impl SqliteNewsStore {
    /// Opens a store backed by a database file.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        tracing::debug!(path, "Opened SQLite news store");
        Ok(Self { conn })
    }

    /// Opens a store backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is closed.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Closes the underlying connection.
    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }
}

#[async_trait]
impl NewsStore for SqliteNewsStore {
    async fn insert_news(&self, item: &NewsItem) -> Result<i64> {
        let create_time = item.create_time.ok_or_else(|| {
            RepositoryError::InvalidData("createTime must be set before insert".to_string())
        })?;
        let title = item.title.clone();
        let description = item.description.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_NEWS,
                    rusqlite::params![create_time, title, description],
                )
                .map_err(wrap_err)?;
                Ok(conn.last_insert_rowid())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn update_news(&self, item: &NewsItem) -> Result<u64> {
        let id = item.id().ok_or_else(|| {
            RepositoryError::InvalidData("identifier must be set before update".to_string())
        })?;
        let title = item.title.clone();
        let description = item.description.clone();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_NEWS,
                        rusqlite::params![id, title, description],
                    )
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn delete_news(&self, id: i64) -> Result<u64> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_NEWS, [id])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn find_news(&self, id: i64) -> Result<Option<NewsSnapshot>> {
        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_NEWS_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([id], row_to_snapshot) {
                    Ok(snapshot) => Ok(Some(snapshot)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, ENTITY, id.to_string()))
    }

    async fn list_news(&self, offset: u64, limit: u64) -> Result<Vec<NewsSnapshot>> {
        let offset = to_sql_int(offset)?;
        let limit = to_sql_int(limit)?;

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_NEWS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([offset, limit], row_to_snapshot)
                    .map_err(wrap_err)?;

                let mut news = Vec::new();
                for row_result in rows {
                    news.push(row_result.map_err(wrap_err)?);
                }
                Ok(news)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))
    }

    async fn count_news(&self) -> Result<u64> {
        let count = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_NEWS, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, ENTITY))?;

        count_to_u64(count)
    }
}
