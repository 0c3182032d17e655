//! Pure functions for serializing/deserializing cached values to/from bytes.
//!
//! Snapshots and pages use JSON, which keeps cache values readable when
//! inspected with a cache client. Counters use plain ASCII decimal text so
//! that backends with native increment commands can operate on them.

use crate::news::NewsSnapshot;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a news snapshot to JSON bytes.
pub fn serialize_snapshot(snapshot: &NewsSnapshot) -> Result<Vec<u8>> {
    serde_json::to_vec(snapshot).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a news snapshot.
pub fn deserialize_snapshot(bytes: &[u8]) -> Result<NewsSnapshot> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes an ordered page of news snapshots to JSON bytes.
///
/// # Arguments
/// * `page` - The rows of the page, in display order
///
/// # Returns
/// JSON-encoded bytes representing the rows array
pub fn serialize_page(page: &[NewsSnapshot]) -> Result<Vec<u8>> {
    serde_json::to_vec(page).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an ordered page of news snapshots.
pub fn deserialize_page(bytes: &[u8]) -> Result<Vec<NewsSnapshot>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Encodes a counter as ASCII decimal bytes.
pub fn encode_counter(value: i64) -> Vec<u8> {
    value.to_string().into_bytes()
}

/// Decodes ASCII decimal bytes to a counter.
///
/// Surrounding whitespace is ignored.
pub fn decode_counter(bytes: &[u8]) -> Result<i64> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| SerializationError::DeserializeFailed(e.to_string()))?;
    text.trim()
        .parse()
        .map_err(|e: std::num::ParseIntError| SerializationError::DeserializeFailed(e.to_string()))
}
