//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create the news table.
pub const CREATE_TABLES: &str = r#"
-- News table
CREATE TABLE IF NOT EXISTS news (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    createTime INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT
);

-- Pages are listed newest first
CREATE INDEX IF NOT EXISTS idx_news_create_time ON news(createTime);
"#;

pub const INSERT_NEWS: &str = r#"
INSERT INTO news (createTime, title, description)
VALUES (?1, ?2, ?3)
"#;

pub const UPDATE_NEWS: &str = r#"
UPDATE news
SET title = ?2, description = ?3
WHERE id = ?1
"#;

pub const DELETE_NEWS: &str = r#"
DELETE FROM news
WHERE id = ?1
"#;

pub const SELECT_NEWS_BY_ID: &str = r#"
SELECT id, createTime, title, description
FROM news
WHERE id = ?1
LIMIT 1
"#;

pub const SELECT_NEWS_PAGE: &str = r#"
SELECT id, createTime, title, description
FROM news
ORDER BY createTime DESC, id DESC
LIMIT ?2 OFFSET ?1
"#;

pub const COUNT_NEWS: &str = r#"
SELECT COUNT(*)
FROM news
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_is_valid_sql() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS news"));
        assert!(CREATE_TABLES.contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_queries_contain_expected_keywords() {
        assert!(INSERT_NEWS.contains("INSERT"));
        assert!(UPDATE_NEWS.contains("UPDATE"));
        assert!(!UPDATE_NEWS.contains("createTime"));
        assert!(DELETE_NEWS.contains("DELETE"));
        assert!(SELECT_NEWS_BY_ID.contains("LIMIT 1"));
        assert!(SELECT_NEWS_PAGE.contains("ORDER BY createTime DESC"));
        assert!(COUNT_NEWS.contains("COUNT(*)"));
    }
}
