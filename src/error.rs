//! Error types shared across the engine, collaborators and HTTP layer.

use thiserror::Error;

/// Why the engine could not evaluate a candle sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SignalError {
    #[error("insufficient data: {available} candles available, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("malformed candle at index {index}: non-finite OHLC value")]
    MalformedCandle { index: usize },
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("market data request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("market data endpoint returned status {status}")]
    Status { status: u16 },

    #[error("failed to decode market data: {0}")]
    Decode(String),

    #[error("invalid market data url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The source has no candles or quote for the symbol at all.
    #[error("market data unavailable for {0}")]
    Unavailable(String),
}

impl MarketDataError {
    /// Transport failures and server-side errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            MarketDataError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            MarketDataError::Status { status } => *status >= 500,
            _ => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Signal(#[from] SignalError),
}
