//! API Module
//!
//! HTTP handlers and routing for the ticker proxy.
//!
//! # Endpoints
//! - `GET /api/symbols` - All symbols known upstream
//! - `GET /api/ticker/:symbol` - Ticker for one symbol
//! - `GET /api/stats` - Cache statistics
//! - `GET /health` - Health check endpoint
//! - anything else - Dashboard assets

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_app, create_router};
