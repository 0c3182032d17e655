use super::{NewsError, NewsItem};

/// Validates a news item before it is written to the store.
pub fn validate_news(item: &NewsItem) -> Result<(), NewsError> {
    if item.title.trim().is_empty() {
        return Err(NewsError::EmptyTitle);
    }
    Ok(())
}

/// Validates a 1-based page number.
pub fn validate_page(page: u32) -> Result<(), NewsError> {
    if page == 0 {
        return Err(NewsError::InvalidPage(page));
    }
    Ok(())
}

/// Returns the row offset of the first item on `page`.
///
/// Page 1 starts at offset 0. Callers validate the page number first; page 0
/// saturates to offset 0.
pub fn page_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}
