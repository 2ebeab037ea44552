//! Cache Entry Module
//!
//! Defines cache keys and the timestamped entries stored under them.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Display form of the aggregate symbols key.
pub const SYMBOLS_KEY: &str = "symbols";

// == Cache Key ==
/// Identifier for a cacheable upstream query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The list of all symbols
    Symbols,
    /// A single ticker symbol, already normalized
    Ticker(String),
}

impl CacheKey {
    pub fn ticker(symbol: impl Into<String>) -> Self {
        Self::Ticker(symbol.into())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Symbols => f.write_str(SYMBOLS_KEY),
            CacheKey::Ticker(symbol) => f.write_str(symbol),
        }
    }
}

// == Cache Entry ==
/// The most recent successful upstream payload for one key.
///
/// Payload and fetch time are only ever set together, through `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    payload: Value,
    fetched_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(payload: Value, fetched_at: DateTime<Utc>) -> Self {
        Self {
            payload,
            fetched_at,
        }
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    // == Is Valid ==
    /// Checks whether the entry may still be served at `now`.
    ///
    /// Valid iff `now - fetched_at < expiration`. A zero expiration is never
    /// valid. A `now` before `fetched_at` (clock stepped back) counts as fresh.
    pub fn is_valid_at(&self, now: DateTime<Utc>, expiration: Duration) -> bool {
        expiration > Duration::zero() && now.signed_duration_since(self.fetched_at) < expiration
    }

    // == Expires At ==
    /// First instant at which the entry is no longer valid, if representable.
    pub fn expires_at(&self, expiration: Duration) -> Option<DateTime<Utc>> {
        self.fetched_at.checked_add_signed(expiration)
    }
}
