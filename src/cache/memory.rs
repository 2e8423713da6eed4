use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;

use super::{CacheKey, CachedSignals, SignalCache};
use crate::error::CacheError;

/// Process-local cache; entries older than the TTL are treated as absent.
pub struct InMemorySignalCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CachedSignals>>,
}

impl InMemorySignalCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl SignalCache for InMemorySignalCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedSignals>, CacheError> {
        let now = Utc::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.is_fresh(self.ttl, now) => return Ok(Some(entry.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it now rather than waiting for the next write.
        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| !entry.is_fresh(self.ttl, now))
        {
            entries.remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &CacheKey, value: CachedSignals) -> Result<(), CacheError> {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        // Keys carry caller-supplied tickers, so stale ones are swept on every write.
        entries.retain(|_, entry| entry.is_fresh(self.ttl, now));
        entries.insert(key.clone(), value);
        Ok(())
    }
}
