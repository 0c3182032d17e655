//! Cache backend implementations.
//!
//! This module provides concrete implementations of the `KeyValueCache`
//! trait defined in `newscache_core::cache`.
//!
//! # Backends
//!
//! - `memory` (always available): in-process LRU cache using tokio synchronization primitives
//! - `redis_impl` (feature `redis`): Redis cache using the redis crate

pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

#[cfg_attr(feature = "redis", allow(unused_imports))]
pub use memory::MemoryCache;

#[cfg(feature = "redis")]
pub use redis_impl::RedisCache;
