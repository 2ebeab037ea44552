//! Request parameters for the ticker proxy API
//!
//! Validates and normalizes the symbol taken from the request path.

use crate::error::{ProxyError, Result};

/// Longest symbol accepted, in bytes.
pub const MAX_SYMBOL_LENGTH: usize = 32;

/// Normalizes a ticker symbol from `GET /api/ticker/:symbol`.
///
/// Trims surrounding whitespace and upper-cases the rest. The result must be
/// 1 to 32 ASCII letters, digits, `-` or `_`.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_ascii_uppercase();

    let well_formed = !symbol.is_empty()
        && symbol.len() <= MAX_SYMBOL_LENGTH
        && symbol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if well_formed {
        Ok(symbol)
    } else {
        Err(ProxyError::InvalidSymbol(raw.to_string()))
    }
}
