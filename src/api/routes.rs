//! API Routes
//!
//! Configures the Axum router with the JSON API and the dashboard assets.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, stats_handler, symbols_handler, ticker_handler, AppState,
};

/// Creates the API router.
///
/// # Endpoints
/// - `GET /api/symbols` - All symbols
/// - `GET /api/ticker/:symbol` - One ticker
/// - `GET /api/stats` - Cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/symbols", get(symbols_handler))
        .route("/api/ticker/:symbol", get(ticker_handler))
        .route("/api/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Creates the API router with the dashboard served from `static_dir` for
/// every other path (`/` maps to `index.html`).
pub fn create_app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    create_router(state).fallback_service(ServeDir::new(static_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStore;
    use crate::error::{ProxyError, Result};
    use crate::upstream::TickerSource;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct EchoSource;

    #[async_trait]
    impl TickerSource for EchoSource {
        async fn fetch_symbols(&self) -> Result<Value> {
            Ok(json!({"BTC-USD": {"status": "open"}}))
        }

        async fn fetch_ticker(&self, symbol: &str) -> Result<Value> {
            if symbol == "FAKE-USD" {
                return Err(ProxyError::not_found(symbol, "Not Found"));
            }
            Ok(json!({ "symbol": symbol, "price_24h": 1.0 }))
        }
    }

    fn create_test_app() -> Router {
        let state = AppState::new(CacheStore::with_ttl_secs(300), Arc::new(EchoSource));
        create_router(state)
    }

    async fn get_status(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(get_status("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(get_status("/api/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_symbols_endpoint() {
        assert_eq!(get_status("/api/symbols").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ticker_endpoint() {
        assert_eq!(get_status("/api/ticker/eth-usd").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ticker_not_found() {
        assert_eq!(get_status("/api/ticker/FAKE-USD").await, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_ticker_bad_symbol() {
        assert_eq!(get_status("/api/ticker/BTC%2FUSD").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ticker_invalid_utf8_symbol_is_json_400() {
        let response = create_test_app()
            .oneshot(Request::builder().uri("/api/ticker/%FF").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(json["message"].as_str().unwrap().contains("%FF"));
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route() {
        assert_eq!(get_status("/api/nothing").await, StatusCode::NOT_FOUND);
    }
}
