mod error;
mod operations;
mod types;

pub use error::NewsError;
pub use operations::{page_offset, validate_news, validate_page};
pub use types::{NewsItem, NewsSnapshot};
