use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failure to produce a quote or price series for one symbol.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("No data returned for {0}")]
    NoData(String),
}

/// Failure to read or write the watchlist file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Watchlist I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watchlist file {} is malformed: {reason}", .path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Failed to encode watchlist: {0}")]
    Encode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ticker symbol is empty")]
    Empty,

    #[error("Invalid ticker symbol: {0}")]
    Invalid(String),

    #[error("No ticker symbols given")]
    NoSymbols,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Config error: {0}")]
    Config(String),
}
