//! Deterministic demo market data for running without a collector.

use chrono::Utc;

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::{CandleInterval, MarketDataProvider};

pub const DEFAULT_BASE_PRICE: f64 = 22500.0;

/// Candles from a fixed blend of sine waves around `base_price`.
///
/// Prices are a function of the symbol and the absolute time slot, so the
/// same bar has the same value no matter how many candles are requested.
#[derive(Debug, Clone)]
pub struct SyntheticMarketDataProvider {
    base_price: f64,
    anchor: Option<i64>,
}

impl Default for SyntheticMarketDataProvider {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PRICE)
    }
}

impl SyntheticMarketDataProvider {
    pub fn new(base_price: f64) -> Self {
        Self {
            base_price,
            anchor: None,
        }
    }

    /// Pin the newest candle to `timestamp` (epoch millis) instead of now.
    pub fn with_anchor(mut self, timestamp: i64) -> Self {
        self.anchor = Some(timestamp);
        self
    }

    fn phase(symbol: &str) -> f64 {
        let seed = symbol
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
        (seed % 997) as f64
    }

    fn price_at(&self, phase: f64, slot: i64) -> f64 {
        let t = slot as f64 + phase;
        self.base_price
            + self.base_price * 0.0030 * (t / 11.0).sin()
            + self.base_price * 0.0012 * (t / 3.7).sin()
            + self.base_price * 0.0004 * (t * 1.3).sin()
    }

    pub fn candles(&self, symbol: &str, interval: CandleInterval, limit: usize) -> Vec<Candle> {
        let step = interval.millis();
        let newest = self.anchor.unwrap_or_else(|| Utc::now().timestamp_millis());
        let newest_slot = newest.div_euclid(step);
        let phase = Self::phase(symbol);
        let wick = self.base_price * 0.0005;

        (0..limit as i64)
            .rev()
            .map(|back| {
                let slot = newest_slot - back;
                let open = self.price_at(phase, slot - 1);
                let close = self.price_at(phase, slot);
                let spread = wick * (1.0 + ((slot as f64 + phase) * 0.7).sin().abs());
                Candle::new(
                    open,
                    open.max(close) + spread,
                    open.min(close) - spread,
                    close,
                    slot * step,
                )
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for SyntheticMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        Ok(self.candles(symbol, interval, limit))
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError> {
        Ok(self
            .candles(symbol, CandleInterval::FifteenMinute, 1)
            .last()
            .map(|c| c.close))
    }
}
