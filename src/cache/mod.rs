//! TTL memoization of assembled signal sets.

pub mod memory;
pub mod redis_store;

pub use memory::InMemorySignalCache;
pub use redis_store::RedisCache;

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CacheError;
use crate::models::signal::TradeSignal;

/// Signals are memoized per instrument and scan window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub instrument: String,
    pub window: usize,
}

impl CacheKey {
    pub fn new(instrument: impl Into<String>, window: usize) -> Self {
        Self {
            instrument: instrument.into(),
            window,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "signals:{}:{}", self.instrument, self.window)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedSignals {
    pub signals: Vec<TradeSignal>,
    pub generated_at: DateTime<Utc>,
}

impl CachedSignals {
    pub fn new(signals: Vec<TradeSignal>) -> Self {
        Self {
            signals,
            generated_at: Utc::now(),
        }
    }

    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now.signed_duration_since(self.generated_at) < ttl,
            Err(_) => true,
        }
    }
}

#[async_trait::async_trait]
pub trait SignalCache: Send + Sync {
    /// A fresh entry for `key`, or `None` on miss or expiry.
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedSignals>, CacheError>;

    async fn put(&self, key: &CacheKey, value: CachedSignals) -> Result<(), CacheError>;
}
