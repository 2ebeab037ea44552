//! API Handlers
//!
//! HTTP request handlers for each ticker proxy endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::cache::{fetch_or_serve, shared, CacheKey, CacheStore, SharedCache};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{normalize_symbol, HealthResponse, StatsResponse, TickerResponse};
use crate::upstream::{HttpTickerClient, TickerSource};

/// Application state shared across all handlers.
///
/// Owns the cache for the lifetime of the server; it is dropped with the
/// router on shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    /// Where cache misses are fetched from
    pub upstream: Arc<dyn TickerSource>,
    /// Time source for stamping and aging entries
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new AppState reading the system clock.
    pub fn new(cache: CacheStore, upstream: Arc<dyn TickerSource>) -> Self {
        Self {
            cache: shared(cache),
            upstream,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Creates a new AppState from configuration.
    ///
    /// Builds the HTTP upstream client and an empty cache with the configured
    /// expiration window.
    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        let upstream = HttpTickerClient::from_config(config)?;
        let cache = CacheStore::with_ttl_secs(config.cache_ttl);
        Ok(Self::new(cache, Arc::new(upstream)))
    }
}

// == Symbol Path ==
/// The raw `:symbol` path segment.
///
/// Rejects segments that do not decode to UTF-8 with
/// [`ProxyError::InvalidSymbol`], so they get the usual JSON error body.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolPath(pub String);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for SymbolPath {
    type Rejection = ProxyError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(symbol)) => Ok(Self(symbol)),
            Err(rejection) => {
                debug!("Rejected symbol path {}: {}", parts.uri.path(), rejection.body_text());
                let raw = parts.uri.path().rsplit('/').next().unwrap_or_default();
                Err(ProxyError::InvalidSymbol(raw.to_string()))
            }
        }
    }
}

/// Handler for GET /api/symbols
///
/// Returns the upstream symbol list, from cache while it is fresh.
pub async fn symbols_handler(State(state): State<AppState>) -> Result<Json<Value>> {
    let upstream = state.upstream.clone();
    let entry = fetch_or_serve(&state.cache, state.clock.as_ref(), CacheKey::Symbols, || {
        async move { upstream.fetch_symbols().await }
    })
    .await?;

    Ok(Json(entry.payload().clone()))
}

/// Handler for GET /api/ticker/:symbol
///
/// Returns one ticker, augmented with `price_24h_ago` and `last_trade_time`.
pub async fn ticker_handler(
    State(state): State<AppState>,
    SymbolPath(symbol): SymbolPath,
) -> Result<Json<TickerResponse>> {
    let symbol = normalize_symbol(&symbol)?;

    let upstream = state.upstream.clone();
    let key = CacheKey::ticker(symbol.clone());
    let entry = fetch_or_serve(&state.cache, state.clock.as_ref(), key, || {
        async move { upstream.fetch_ticker(&symbol).await }
    })
    .await?;

    Ok(Json(TickerResponse::from_entry(&entry)))
}

/// Handler for GET /api/stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    // Acquire read lock for stats
    let cache = state.cache.read().await;
    let stats = cache.stats();

    Json(StatsResponse::new(&stats, cache.expiration().num_seconds()))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
