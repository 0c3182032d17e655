//! Redis cache backend implementation.
//!
//! Provides a shared cache for deployments where several processes serve the
//! same news table. Counters use the native INCRBY/DECRBY commands.

mod cache;
mod error;

pub use cache::RedisCache;
