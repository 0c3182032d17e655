//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `NewsStore` trait
//! defined in `newscache_core::storage`.
//!
//! # Backends
//!
//! - `sqlite` (default feature): SQLite storage using `rusqlite` and `tokio-rusqlite`
//! - `inmemory` (always available): ordered map storage for tests and throwaway runs
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p newscache
//! ```
//!
//! Build without SQLite (in-memory store only):
//! ```bash
//! cargo build -p newscache --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryNewsStore;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteNewsStore;
