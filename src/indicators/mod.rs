pub mod momentum;
pub mod series;
pub mod trend;

pub use series::IndicatorSeries;

use crate::config::EngineConfig;
use crate::models::indicators::{Candle, MacdPoint};

/// Closing prices in candle order.
pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

/// Every indicator the decision policy reads, computed over one close series.
#[derive(Debug, Clone)]
pub struct IndicatorSet {
    pub rsi: IndicatorSeries<f64>,
    pub macd: IndicatorSeries<MacdPoint>,
    pub ema_fast: IndicatorSeries<f64>,
    pub ema_slow: IndicatorSeries<f64>,
}

impl IndicatorSet {
    pub fn compute(closes: &[f64], config: &EngineConfig) -> Self {
        Self {
            rsi: momentum::rsi_series(closes, config.rsi_period),
            macd: momentum::macd_series(
                closes,
                config.macd_fast_period,
                config.macd_slow_period,
                config.macd_signal_period,
            ),
            ema_fast: trend::ema_series(closes, config.ema_fast_period),
            ema_slow: trend::ema_series(closes, config.ema_slow_period),
        }
    }

    /// The latest first-valid index across all series: the earliest bar at
    /// which every indicator is defined.
    pub fn warmup_index(&self) -> usize {
        [
            self.rsi.first_index(),
            self.macd.first_index(),
            self.ema_fast.first_index(),
            self.ema_slow.first_index(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }

    pub fn any_empty(&self) -> bool {
        self.rsi.is_empty()
            || self.macd.is_empty()
            || self.ema_fast.is_empty()
            || self.ema_slow.is_empty()
    }
}
