//! EMA (Exponential Moving Average) indicator

use crate::indicators::series::IndicatorSeries;

/// EMA over `values`.
///
/// Seeded with the simple average of the first `period` values (anchored at
/// index `period - 1`), then `ema[i] = v[i] * k + ema[i - 1] * (1 - k)` with
/// `k = 2 / (period + 1)`.
pub fn ema_series(values: &[f64], period: usize) -> IndicatorSeries<f64> {
    if period == 0 || values.len() < period {
        return IndicatorSeries::empty();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let seed = values[..period].iter().sum::<f64>() / period as f64;

    let mut ema = Vec::with_capacity(values.len() - period + 1);
    ema.push(seed);

    let mut previous = seed;
    for &value in &values[period..] {
        previous = value * k + previous * (1.0 - k);
        ema.push(previous);
    }

    IndicatorSeries::new(period - 1, ema)
}

/// Latest EMA value, if the series warmed up.
pub fn calculate_ema(closes: &[f64], period: usize) -> Option<f64> {
    ema_series(closes, period).last()
}
