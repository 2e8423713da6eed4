//! Signal retrieval: cache lookup, candle fetch, engine run.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{CacheKey, CachedSignals, SignalCache};
use crate::error::{MarketDataError, ServiceError};
use crate::metrics::Metrics;
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::signal::TradeSignal;
use crate::services::market_data::{CandleInterval, MarketDataProvider};
use crate::signals::engine::{SignalEngine, SignalSet};

pub const SIGNAL_INTERVAL: CandleInterval = CandleInterval::FifteenMinute;

pub struct SignalService {
    provider: Arc<dyn MarketDataProvider>,
    cache: Arc<dyn SignalCache>,
    engine: SignalEngine,
    metrics: Option<Arc<Metrics>>,
    candle_limit: usize,
}

impl SignalService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        cache: Arc<dyn SignalCache>,
        engine: SignalEngine,
        candle_limit: usize,
    ) -> Self {
        Self {
            provider,
            cache,
            engine,
            metrics: None,
            candle_limit,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn engine(&self) -> &SignalEngine {
        &self.engine
    }

    pub fn provider(&self) -> &Arc<dyn MarketDataProvider> {
        &self.provider
    }

    /// Signals for `ticker`, served from the cache while fresh.
    ///
    /// Cache failures are logged and treated as misses.
    pub async fn signals_for(&self, ticker: &str) -> Result<Vec<TradeSignal>, MarketDataError> {
        let key = CacheKey::new(ticker, self.engine.config().scan_window);

        match self.cache.get(&key).await {
            Ok(Some(entry)) => {
                if let Some(metrics) = &self.metrics {
                    metrics.signal_cache_hits_total.inc();
                }
                debug!(key = %key, generated_at = %entry.generated_at, "Signal cache hit");
                return Ok(entry.signals);
            }
            Ok(None) => {}
            Err(e) => warn!(key = %key, error = %e, "Signal cache read failed"),
        }
        if let Some(metrics) = &self.metrics {
            metrics.signal_cache_misses_total.inc();
        }

        let candles = self.fetch_candles(ticker).await?;
        let set = self.engine.generate_or_default(ticker, &candles);
        self.record(&set);

        if let Err(e) = self
            .cache
            .put(&key, CachedSignals::new(set.signals.clone()))
            .await
        {
            warn!(key = %key, error = %e, "Signal cache write failed");
        }

        Ok(set.into_signals())
    }

    /// Indicator readings at the newest aligned bar of `ticker`.
    pub async fn snapshot_for(&self, ticker: &str) -> Result<IndicatorSnapshot, ServiceError> {
        let candles = self.fetch_candles(ticker).await?;
        Ok(self.engine.snapshot(ticker, &candles)?)
    }

    /// An instrument without history is evaluated as an empty series.
    async fn fetch_candles(&self, ticker: &str) -> Result<Vec<Candle>, MarketDataError> {
        match self
            .provider
            .get_candles(ticker, SIGNAL_INTERVAL, self.candle_limit)
            .await
        {
            Err(MarketDataError::Unavailable(symbol)) => {
                debug!(symbol = %symbol, "No candles available");
                Ok(Vec::new())
            }
            result => result,
        }
    }

    fn record(&self, set: &SignalSet) {
        let Some(metrics) = &self.metrics else {
            return;
        };
        match set.fallback {
            Some(reason) => metrics
                .signal_fallbacks_total
                .with_label_values(&[reason.as_str()])
                .inc(),
            None => {
                for signal in &set.signals {
                    metrics
                        .signals_emitted_total
                        .with_label_values(&[signal.signal.as_str()])
                        .inc();
                }
            }
        }
    }
}
