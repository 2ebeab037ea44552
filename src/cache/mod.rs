//! Cache Module
//!
//! In-memory store of upstream payloads with a time-based validity check,
//! and the fetch-or-serve flow built on it.

mod entry;
mod fetch;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, CacheKey, SYMBOLS_KEY};
pub use fetch::{fetch_or_serve, shared, SharedCache};
pub use stats::{CacheCounters, CacheStats};
pub use store::CacheStore;
