//! Crypto Ticker - A caching proxy for a cryptocurrency ticker API
//!
//! Forwards symbol and ticker lookups upstream, keeps each result in memory
//! for a fixed window, and serves a small browser dashboard.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_cleanup_task;
