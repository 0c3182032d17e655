//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use newscache_core::news::NewsSnapshot;
use newscache_core::storage::RepositoryError;
use rusqlite::Row;

/// Convert a SQLite row to a NewsSnapshot.
///
/// Expected columns: id, createTime, title, description
pub fn row_to_snapshot(row: &Row) -> rusqlite::Result<NewsSnapshot> {
    Ok(NewsSnapshot {
        id: row.get(0)?,
        create_time: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
    })
}

/// Convert a `COUNT(*)` result to a row count.
pub fn count_to_u64(count: i64) -> Result<u64, RepositoryError> {
    u64::try_from(count)
        .map_err(|_| RepositoryError::InvalidData(format!("negative row count: {count}")))
}

/// Convert a page offset or limit to the integer type SQLite binds.
pub fn to_sql_int(value: u64) -> Result<i64, RepositoryError> {
    i64::try_from(value)
        .map_err(|_| RepositoryError::InvalidData(format!("value out of range: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_to_snapshot() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let snapshot = conn
            .query_row(
                "SELECT 4, 1700000000, 'Headline', NULL",
                [],
                row_to_snapshot,
            )
            .unwrap();

        assert_eq!(
            snapshot,
            NewsSnapshot {
                id: 4,
                create_time: 1_700_000_000,
                title: "Headline".to_string(),
                description: None,
            }
        );
    }

    #[test]
    fn test_count_to_u64() {
        assert_eq!(count_to_u64(12), Ok(12));
        assert!(matches!(
            count_to_u64(-1),
            Err(RepositoryError::InvalidData(_))
        ));
    }

    #[test]
    fn test_to_sql_int() {
        assert_eq!(to_sql_int(5), Ok(5));
        assert!(matches!(
            to_sql_int(u64::MAX),
            Err(RepositoryError::InvalidData(_))
        ));
    }
}
