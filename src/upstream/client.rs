//! Ticker API client
//!
//! Fetches symbols and tickers over HTTP with a static API token and maps
//! upstream responses onto `ProxyError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::TickerSource;
use crate::cache::SYMBOLS_KEY;
use crate::config::Config;
use crate::error::{ProxyError, Result};

/// Header carrying the upstream API key.
pub const API_TOKEN_HEADER: &str = "X-API-Token";

/// Client for the upstream ticker API.
#[derive(Debug, Clone)]
pub struct HttpTickerClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTickerClient {
    /// Creates a client for `base_url` that gives up on requests after `timeout`.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, api_key))
    }

    /// Creates a client around an existing reqwest client.
    pub fn with_client(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> reqwest::Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.api_key.clone(),
            Duration::from_secs(config.upstream_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GETs `{base}/{path}` and decodes the JSON body.
    ///
    /// `key` names the lookup in any error produced.
    async fn get_json(&self, path: &str, key: &str) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("Sending request to {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_TOKEN_HEADER, &self.api_key)
            .send()
            .await
            .map_err(|e| ProxyError::upstream(key, None, e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ProxyError::upstream(key, Some(status.as_u16()), e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            let detail = error_detail(&body).unwrap_or_else(|| "Not Found".to_string());
            return Err(ProxyError::not_found(key, detail));
        }

        if !status.is_success() {
            let detail = error_detail(&body)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            return Err(ProxyError::upstream(key, Some(status.as_u16()), detail));
        }

        serde_json::from_str(&body).map_err(|e| {
            ProxyError::upstream(key, Some(status.as_u16()), format!("Malformed upstream payload: {}", e))
        })
    }
}

#[async_trait]
impl TickerSource for HttpTickerClient {
    async fn fetch_symbols(&self) -> Result<Value> {
        let payload = self.get_json("symbols", SYMBOLS_KEY).await?;
        if payload.is_object() || payload.is_array() {
            Ok(payload)
        } else {
            Err(ProxyError::upstream(
                SYMBOLS_KEY,
                None,
                "Malformed upstream payload: expected a list of symbols",
            ))
        }
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Value> {
        let payload = self.get_json(&format!("tickers/{}", symbol), symbol).await?;
        if payload.is_object() {
            Ok(payload)
        } else {
            Err(ProxyError::upstream(
                symbol,
                None,
                "Malformed upstream payload: expected a ticker object",
            ))
        }
    }
}

/// Pulls a human readable message out of an upstream error body.
///
/// Looks for a string `message` or `error` field in a JSON object.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|field| value.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_message_field() {
        let body = r#"{"message": "Symbol not found"}"#;
        assert_eq!(error_detail(body).as_deref(), Some("Symbol not found"));
    }

    #[test]
    fn test_error_detail_error_field() {
        let body = r#"{"error": "Unauthorized"}"#;
        assert_eq!(error_detail(body).as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn test_error_detail_unusable_bodies() {
        assert_eq!(error_detail(""), None);
        assert_eq!(error_detail("<html>oops</html>"), None);
        assert_eq!(error_detail(r#"{"message": 12}"#), None);
        assert_eq!(error_detail(r#"{"message": "  "}"#), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpTickerClient::with_client(Client::new(), "http://localhost:9/v3/", "key");
        assert_eq!(client.base_url(), "http://localhost:9/v3");
    }
}
