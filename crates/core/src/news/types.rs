use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A news item as edited by callers.
///
/// The identifier is assigned by the store on first insert and cannot be set
/// from outside afterwards. An item without an identifier has never been
/// persisted, so saving it performs an insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsItem {
    id: Option<i64>,
    /// Unix timestamp (seconds) set once on creation.
    pub create_time: Option<i64>,
    pub title: String,
    pub description: Option<String>,
}

impl NewsItem {
    /// Creates a new, unpersisted news item with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description for this item.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the store-assigned identifier, if the item has been persisted.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// Returns true if the item represents a persisted row.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Records the identifier generated by the store after an insert.
    ///
    /// Has no effect on an item that already carries an identifier.
    pub fn assign_id(&mut self, id: i64) {
        if self.id.is_none() {
            self.id = Some(id);
        }
    }

    /// Stamps the creation time with the current UTC time.
    ///
    /// Has no effect if the creation time is already set.
    pub fn stamp_create_time(&mut self) {
        if self.create_time.is_none() {
            self.create_time = Some(Utc::now().timestamp());
        }
    }

    /// Returns the item to the unpersisted state.
    pub fn reset(&mut self) {
        self.id = None;
        self.create_time = None;
        self.title.clear();
        self.description = None;
    }

    /// Returns the displayable attributes of a persisted item.
    ///
    /// Returns `None` until both the identifier and creation time are known.
    pub fn snapshot(&self) -> Option<NewsSnapshot> {
        Some(NewsSnapshot {
            id: self.id?,
            create_time: self.create_time?,
            title: self.title.clone(),
            description: self.description.clone(),
        })
    }
}

impl From<NewsSnapshot> for NewsItem {
    fn from(snapshot: NewsSnapshot) -> Self {
        Self {
            id: Some(snapshot.id),
            create_time: Some(snapshot.create_time),
            title: snapshot.title,
            description: snapshot.description,
        }
    }
}

/// A row snapshot of a persisted news item.
///
/// This is what the cache holds for pages and details, serialized with the
/// column names of the `news` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSnapshot {
    pub id: i64,
    #[serde(rename = "createTime")]
    pub create_time: i64,
    pub title: String,
    pub description: Option<String>,
}
