//! Index alignment between candles and indicators with different warm-ups.
//!
//! Every series carries its first valid absolute index, so a bar is looked up
//! by the same candle index in all of them. The scan is anchored on MACD,
//! whose signal line starts last.

use crate::config::EngineConfig;
use crate::error::SignalError;
use crate::indicators::IndicatorSet;
use crate::models::indicators::{Candle, MacdPoint};

/// A candle together with every indicator value defined at its index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedBar {
    pub index: usize,
    pub candle: Candle,
    pub rsi: f64,
    pub macd: MacdPoint,
    pub ema_fast: f64,
    pub ema_slow: f64,
}

impl AlignedBar {
    /// `None` unless all indicators are defined at `index`.
    pub fn at(index: usize, candles: &[Candle], indicators: &IndicatorSet) -> Option<Self> {
        Some(Self {
            index,
            candle: *candles.get(index)?,
            rsi: indicators.rsi.get(index)?,
            macd: indicators.macd.get(index)?,
            ema_fast: indicators.ema_fast.get(index)?,
            ema_slow: indicators.ema_slow.get(index)?,
        })
    }
}

/// Aligned bars over the newest `scan_window` MACD positions, newest first.
///
/// Positions where any indicator is still warming up are skipped. Fewer than
/// `min_candles` candles, or an indicator that never warmed up, is
/// `InsufficientData`.
pub fn align_recent(
    candles: &[Candle],
    indicators: &IndicatorSet,
    config: &EngineConfig,
) -> Result<Vec<AlignedBar>, SignalError> {
    let available = candles.len();
    if available < config.min_candles {
        return Err(SignalError::InsufficientData {
            available,
            required: config.min_candles,
        });
    }
    if indicators.any_empty() {
        return Err(SignalError::InsufficientData {
            available,
            required: config.warmup_candles().max(config.min_candles),
        });
    }

    let end = indicators.macd.end_index().min(available);
    let start = end
        .saturating_sub(config.scan_window)
        .max(indicators.macd.first_index());

    let bars: Vec<AlignedBar> = (start..end)
        .rev()
        .filter_map(|index| AlignedBar::at(index, candles, indicators))
        .collect();

    tracing::trace!(
        scanned = end - start,
        aligned = bars.len(),
        "Aligned recent bars"
    );

    Ok(bars)
}
