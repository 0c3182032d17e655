mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::{news_details_key, news_page_key, COUNT_NEWS_KEY, MAX_CACHED_PAGE_KEY};
pub use serialization::{
    decode_counter, deserialize_page, deserialize_snapshot, encode_counter, serialize_page,
    serialize_snapshot, SerializationError,
};
pub use traits::KeyValueCache;
