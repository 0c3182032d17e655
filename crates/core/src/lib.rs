//! Core crate for newscache.
//!
//! Holds the pure parts of the system: the `NewsItem` entity, the cache-key
//! scheme and value encoding, and the traits that the cache and store
//! backends implement. Nothing in here performs I/O.

pub mod cache;
pub mod news;
pub mod storage;
