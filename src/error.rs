//! Error types for the ticker proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Detail used when upstream gives no usable error text.
pub const GENERIC_UPSTREAM_DETAIL: &str = "Upstream service error";

// == Proxy Error Enum ==
/// Unified error type for the ticker proxy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProxyError {
    /// Upstream reports that the key does not exist
    #[error("No data found for '{key}': {detail}")]
    NotFound { key: String, detail: String },

    /// Network error, non-2xx status other than 404, or malformed payload
    #[error("Failed to fetch '{key}' from upstream: {detail}")]
    Upstream {
        key: String,
        status: Option<u16>,
        detail: String,
    },

    /// Symbol rejected before any lookup
    #[error("Invalid symbol '{0}'")]
    InvalidSymbol(String),
}

impl ProxyError {
    // == Constructors ==
    pub fn not_found(key: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            key: key.into(),
            detail: detail.into(),
        }
    }

    pub fn upstream(key: impl Into<String>, status: Option<u16>, detail: impl Into<String>) -> Self {
        Self::Upstream {
            key: key.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Returns true for the "key does not exist" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// HTTP status this error is reported with.
    ///
    /// Upstream failures reuse upstream's status when it is an error status,
    /// and fall back to 500 otherwise.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidSymbol(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }

    /// Human readable sentence naming the key.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound { key, .. } => format!("No data found for '{}'", key),
            Self::Upstream { key, .. } => format!("Failed to fetch '{}' from upstream", key),
            Self::InvalidSymbol(symbol) => format!("Invalid symbol '{}'", symbol),
        }
    }

    /// Upstream-provided detail, or a generic fallback.
    pub fn detail(&self) -> String {
        let detail = match self {
            Self::NotFound { detail, .. } | Self::Upstream { detail, .. } => detail.as_str(),
            Self::InvalidSymbol(_) => {
                "Symbols must be 1-32 characters of letters, digits, '-' or '_'"
            }
        };
        if detail.trim().is_empty() {
            GENERIC_UPSTREAM_DETAIL.to_string()
        } else {
            detail.to_string()
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new(self.message(), self.detail()));
        (self.status_code(), body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the ticker proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;
