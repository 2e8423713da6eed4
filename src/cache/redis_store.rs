use std::time::Duration;

use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::{CacheKey, CachedSignals, SignalCache};
use crate::error::CacheError;

/// Redis-backed signal cache, shared between API server instances.
///
/// Entries are written with `SET EX` so Redis expires them; `generated_at` is
/// still checked on read in case the TTL was changed between deployments.
#[derive(Clone)]
pub struct RedisCache {
    connection: ConnectionManager,
    ttl: Duration,
}

impl RedisCache {
    pub async fn connect(redis_url: &str, ttl: Duration) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let connection = ConnectionManager::new(client).await?;
        Ok(Self { connection, ttl })
    }
}

fn encode_entry(entry: &CachedSignals) -> Result<String, CacheError> {
    Ok(serde_json::to_string(entry)?)
}

/// A stored payload, or `None` once it is older than `ttl`.
fn decode_entry(
    raw: &str,
    ttl: Duration,
    now: DateTime<Utc>,
) -> Result<Option<CachedSignals>, CacheError> {
    let entry: CachedSignals = serde_json::from_str(raw)?;
    Ok(entry.is_fresh(ttl, now).then_some(entry))
}

/// `SET EX` rejects zero, so a sub-second TTL disables writes.
fn expiry_seconds(ttl: Duration) -> Option<u64> {
    Some(ttl.as_secs()).filter(|&seconds| seconds > 0)
}

#[async_trait::async_trait]
impl SignalCache for RedisCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedSignals>, CacheError> {
        let mut conn = self.connection.clone();
        let raw: Option<String> = conn.get(key.to_string()).await?;
        match raw {
            Some(raw) => decode_entry(&raw, self.ttl, Utc::now()),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &CacheKey, value: CachedSignals) -> Result<(), CacheError> {
        let Some(seconds) = expiry_seconds(self.ttl) else {
            return Ok(());
        };
        let payload = encode_entry(&value)?;
        let mut conn = self.connection.clone();
        let _: () = conn.set_ex(key.to_string(), payload, seconds).await?;
        Ok(())
    }
}
