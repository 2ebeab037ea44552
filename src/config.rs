//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

/// Default upstream base URL.
pub const DEFAULT_API_URL: &str = "https://api.blockchain.com/v3/exchange";

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Upstream ticker API base URL, without trailing slash
    pub api_url: String,
    /// Value sent in the `X-API-Token` header
    pub api_key: String,
    /// Cache expiration window in seconds
    pub cache_ttl: u64,
    /// Upstream request timeout in seconds
    pub upstream_timeout: u64,
    /// Background purge task interval in seconds
    pub cleanup_interval: u64,
    /// Directory holding the dashboard assets
    pub static_dir: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 3000)
    /// - `API_URL` - Upstream base URL (default: blockchain.com exchange API)
    /// - `API_KEY` - Upstream API token (default: empty)
    /// - `CACHE_TTL` - Cache expiration in seconds (default: 300)
    /// - `UPSTREAM_TIMEOUT` - Upstream timeout in seconds (default: 10)
    /// - `CLEANUP_INTERVAL` - Purge frequency in seconds (default: 60)
    /// - `STATIC_DIR` - Dashboard asset directory (default: "public")
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            server_port: parse_var("PORT").unwrap_or(defaults.server_port),
            api_url: env::var("API_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_url),
            api_key: env::var("API_KEY").unwrap_or(defaults.api_key),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            static_dir: env::var("STATIC_DIR").unwrap_or(defaults.static_dir),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            cache_ttl: 300,
            upstream_timeout: 10,
            cleanup_interval: 60,
            static_dir: "public".to_string(),
        }
    }
}
