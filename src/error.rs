//! Error types for pop_watch

use thiserror::Error;

/// Unified error type for pop_watch operations
#[derive(Debug, Error)]
pub enum WatchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP error status code
    #[error("HTTP error: {0}")]
    HttpStatus(reqwest::StatusCode),
    /// Failed to parse or serialize JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// State or watchlist file could not be read or written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Watchlist file is well-formed JSON but not a usable watchlist
    #[error("Invalid watchlist: {0}")]
    Watchlist(String),
}

/// Result alias for pop_watch operations
pub type Result<T> = std::result::Result<T, WatchError>;
