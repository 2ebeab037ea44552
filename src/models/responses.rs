//! Response DTOs for the ticker proxy API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::cache::{CacheEntry, CacheStats};

/// Upstream field holding the price 24 hours ago.
const UPSTREAM_PRICE_24H: &str = "price_24h";

/// Response body for `GET /api/ticker/:symbol`
///
/// The upstream ticker object with two fields added: `price_24h_ago`, copied
/// from upstream's `price_24h`, and `last_trade_time`, the time the payload
/// was fetched.
#[derive(Debug, Clone, Serialize)]
pub struct TickerResponse {
    /// Upstream ticker fields, passed through unchanged
    #[serde(flatten)]
    pub ticker: Map<String, Value>,
    /// Price 24 hours ago, when upstream reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_24h_ago: Option<Value>,
    /// RFC 3339 time the ticker was fetched from upstream
    pub last_trade_time: String,
}

impl TickerResponse {
    /// Builds the response from the cache entry that served the lookup.
    pub fn from_entry(entry: &CacheEntry) -> Self {
        let mut ticker = entry.payload().as_object().cloned().unwrap_or_default();
        ticker.remove("price_24h_ago");
        ticker.remove("last_trade_time");

        let price_24h_ago = ticker
            .get(UPSTREAM_PRICE_24H)
            .filter(|v| !v.is_null())
            .cloned();

        Self {
            ticker,
            price_24h_ago,
            last_trade_time: entry.fetched_at().to_rfc3339(),
        }
    }
}

/// Response body for the stats endpoint (GET /api/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Lookups served from cache
    pub hits: u64,
    /// Lookups that went upstream
    pub misses: u64,
    /// Successful upstream fetches
    pub refreshes: u64,
    /// Failed upstream fetches
    pub upstream_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Expiration window in seconds
    pub ttl_seconds: i64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: &CacheStats, ttl_seconds: i64) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            refreshes: stats.refreshes,
            upstream_failures: stats.upstream_failures,
            total_entries: stats.total_entries,
            hit_rate: stats.hit_rate(),
            ttl_seconds,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// What the server was trying to do
    pub message: String,
    /// Upstream's explanation, or a generic one
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
        }
    }
}
