//! In-memory store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use newscache_core::news::{NewsItem, NewsSnapshot};
use newscache_core::storage::{NewsStore, RepositoryError, Result};

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, NewsSnapshot>,
    last_id: i64,
}

/// In-memory storage backend.
///
/// Identifiers are assigned from an increasing sequence and never reused,
/// like an AUTOINCREMENT column. Data is not persisted and will be lost when
/// the last clone of the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNewsStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryNewsStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsStore for InMemoryNewsStore {
    async fn insert_news(&self, item: &NewsItem) -> Result<i64> {
        let create_time = item.create_time.ok_or_else(|| {
            RepositoryError::InvalidData("createTime must be set before insert".to_string())
        })?;

        let mut table = self.table.write().await;
        table.last_id += 1;
        let id = table.last_id;
        table.rows.insert(
            id,
            NewsSnapshot {
                id,
                create_time,
                title: item.title.clone(),
                description: item.description.clone(),
            },
        );
        Ok(id)
    }

    async fn update_news(&self, item: &NewsItem) -> Result<u64> {
        let id = item.id().ok_or_else(|| {
            RepositoryError::InvalidData("identifier must be set before update".to_string())
        })?;

        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                row.title = item.title.clone();
                row.description = item.description.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_news(&self, id: i64) -> Result<u64> {
        let mut table = self.table.write().await;
        Ok(u64::from(table.rows.remove(&id).is_some()))
    }

    async fn find_news(&self, id: i64) -> Result<Option<NewsSnapshot>> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn list_news(&self, offset: u64, limit: u64) -> Result<Vec<NewsSnapshot>> {
        let table = self.table.read().await;

        let mut rows: Vec<&NewsSnapshot> = table.rows.values().collect();
        rows.sort_by(|a, b| {
            b.create_time
                .cmp(&a.create_time)
                .then_with(|| b.id.cmp(&a.id))
        });

        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count_news(&self) -> Result<u64> {
        let table = self.table.read().await;
        Ok(table.rows.len() as u64)
    }
}
