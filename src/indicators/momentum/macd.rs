//! MACD (Moving Average Convergence Divergence) indicator

use crate::indicators::series::IndicatorSeries;
use crate::indicators::trend::ema_series;
use crate::models::indicators::MacdPoint;

/// Calculate the MACD series.
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// Only bars with a defined signal line are included, so the first value sits
/// at `max(fast, slow) - 1 + signal - 1`.
pub fn macd_series(
    closes: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> IndicatorSeries<MacdPoint> {
    let fast = ema_series(closes, fast_period);
    let slow = ema_series(closes, slow_period);
    if fast.is_empty() || slow.is_empty() {
        return IndicatorSeries::empty();
    }

    let line_start = fast.first_index().max(slow.first_index());
    let line: Vec<f64> = (line_start..closes.len())
        .filter_map(|i| Some(fast.get(i)? - slow.get(i)?))
        .collect();

    let signal = ema_series(&line, signal_period);
    if signal.is_empty() {
        return IndicatorSeries::empty();
    }

    let points = signal
        .values()
        .iter()
        .zip(&line[signal.first_index()..])
        .map(|(&signal_value, &macd_value)| MacdPoint::new(macd_value, signal_value))
        .collect();

    IndicatorSeries::new(signal.first_index(), points).offset_by(line_start)
}

/// MACD with the standard 12/26/9 periods.
pub fn macd_series_default(closes: &[f64]) -> IndicatorSeries<MacdPoint> {
    macd_series(closes, 12, 26, 9)
}
