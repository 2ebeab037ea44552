//! Request and Response models for the ticker proxy API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! parsing path parameters and serializing HTTP response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{normalize_symbol, MAX_SYMBOL_LENGTH};
pub use responses::{ErrorResponse, HealthResponse, StatsResponse, TickerResponse};
