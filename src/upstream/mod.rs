//! Upstream Module
//!
//! Access to the remote ticker API this server proxies.
//!
//! # Endpoints consumed
//! - `GET {base}/symbols` - All tradable symbols
//! - `GET {base}/tickers/{symbol}` - Ticker for one symbol

mod client;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use client::{HttpTickerClient, API_TOKEN_HEADER};

/// A source of symbol and ticker payloads.
///
/// Fails with `ProxyError::NotFound` when the symbol does not exist and with
/// `ProxyError::Upstream` for everything else.
#[async_trait]
pub trait TickerSource: Send + Sync {
    /// Fetches the payload describing every symbol.
    async fn fetch_symbols(&self) -> Result<Value>;

    /// Fetches the ticker payload for one normalized symbol.
    async fn fetch_ticker(&self, symbol: &str) -> Result<Value>;
}
