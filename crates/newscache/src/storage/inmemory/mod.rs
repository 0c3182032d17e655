//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `NewsStore` that keeps
//! rows in a map wrapped in `Arc<RwLock<_>>`. This is useful for testing and
//! for runs where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use newscache::storage::inmemory::InMemoryNewsStore;
//!
//! let store = InMemoryNewsStore::new();
//! // Use store for testing...
//! ```

mod store;

pub use store::InMemoryNewsStore;
