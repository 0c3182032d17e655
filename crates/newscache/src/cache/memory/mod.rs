//! In-memory cache backend implementation.
//!
//! Provides a thread-safe, LRU-bounded cache for single-process runs and
//! tests.

#![cfg_attr(feature = "redis", allow(dead_code))]

mod cache;

pub use cache::MemoryCache;
