//! Unit tests for the in-memory signal cache

use std::time::Duration;

use chrono::Utc;
use fnoedge::cache::{CacheKey, CachedSignals, InMemorySignalCache, SignalCache};
use fnoedge::signals::assembler::default_signals;

#[tokio::test]
async fn test_miss_on_empty_cache() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    let key = CacheKey::new("NIFTY_FUT", 20);
    assert!(cache.get(&key).await.unwrap().is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_put_then_get() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    let key = CacheKey::new("NIFTY_FUT", 20);
    cache
        .put(&key, CachedSignals::new(default_signals()))
        .await
        .unwrap();

    let entry = cache.get(&key).await.unwrap().expect("cached entry");
    assert_eq!(entry.signals, default_signals());
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_keys_are_per_instrument_and_window() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    cache
        .put(&CacheKey::new("NIFTY_FUT", 20), CachedSignals::new(default_signals()))
        .await
        .unwrap();

    assert!(cache.get(&CacheKey::new("BANKNIFTY_FUT", 20)).await.unwrap().is_none());
    assert!(cache.get(&CacheKey::new("NIFTY_FUT", 10)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_expired_entry_is_evicted() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    let key = CacheKey::new("NIFTY_FUT", 20);
    let stale = CachedSignals {
        signals: default_signals(),
        generated_at: Utc::now() - chrono::Duration::seconds(120),
    };
    cache.put(&key, stale).await.unwrap();
    assert_eq!(cache.len().await, 1);

    assert!(cache.get(&key).await.unwrap().is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn test_put_overwrites_entry() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    let key = CacheKey::new("NIFTY_FUT", 20);
    cache
        .put(&key, CachedSignals::new(default_signals()))
        .await
        .unwrap();
    cache.put(&key, CachedSignals::new(vec![])).await.unwrap();

    let entry = cache.get(&key).await.unwrap().unwrap();
    assert!(entry.signals.is_empty());
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_put_sweeps_expired_instruments() {
    let cache = InMemorySignalCache::new(Duration::from_millis(1));
    for i in 0..500 {
        cache
            .put(&CacheKey::new(format!("JUNK{i}"), 20), CachedSignals::new(vec![]))
            .await
            .unwrap();
    }
    assert!(cache.len().await >= 1);

    tokio::time::sleep(Duration::from_millis(20)).await;
    cache
        .put(&CacheKey::new("NIFTY_FUT", 20), CachedSignals::new(default_signals()))
        .await
        .unwrap();

    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_put_keeps_fresh_neighbours() {
    let cache = InMemorySignalCache::new(Duration::from_secs(60));
    let stale = CachedSignals {
        signals: default_signals(),
        generated_at: Utc::now() - chrono::Duration::seconds(120),
    };
    cache.put(&CacheKey::new("OLD_FUT", 20), stale).await.unwrap();
    cache
        .put(&CacheKey::new("BANKNIFTY_FUT", 20), CachedSignals::new(vec![]))
        .await
        .unwrap();
    cache
        .put(&CacheKey::new("NIFTY_FUT", 20), CachedSignals::new(vec![]))
        .await
        .unwrap();

    assert_eq!(cache.len().await, 2);
    assert!(cache.get(&CacheKey::new("BANKNIFTY_FUT", 20)).await.unwrap().is_some());
}

#[test]
fn test_freshness_window() {
    let now = Utc::now();
    let entry = CachedSignals {
        signals: vec![],
        generated_at: now - chrono::Duration::seconds(30),
    };
    assert!(entry.is_fresh(Duration::from_secs(60), now));
    assert!(!entry.is_fresh(Duration::from_secs(30), now));
    assert!(!entry.is_fresh(Duration::from_secs(10), now));
}

#[test]
fn test_cache_key_format() {
    assert_eq!(CacheKey::new("NIFTY_FUT", 20).to_string(), "signals:NIFTY_FUT:20");
}
