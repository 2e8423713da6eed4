//! RSI (Relative Strength Index) indicator

use crate::indicators::series::IndicatorSeries;

/// Calculate the RSI series with Wilder smoothing.
///
/// RSI = 100 - (100 / (1 + RS)), RS = Average Gain / Average Loss
///
/// The first average is the simple mean of the first `period` changes, so the
/// first value belongs to index `period`.
pub fn rsi_series(closes: &[f64], period: usize) -> IndicatorSeries<f64> {
    if period == 0 || closes.len() <= period {
        return IndicatorSeries::empty();
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for window in closes[..=period].windows(2) {
        let change = window[1] - window[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let period_f = period as f64;
    let mut avg_gain = gains / period_f;
    let mut avg_loss = losses / period_f;

    let mut values = Vec::with_capacity(closes.len() - period);
    values.push(relative_strength_index(avg_gain, avg_loss));

    for window in closes[period..].windows(2) {
        let change = window[1] - window[0];
        let (gain, loss) = if change > 0.0 {
            (change, 0.0)
        } else {
            (0.0, -change)
        };
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
        values.push(relative_strength_index(avg_gain, avg_loss));
    }

    IndicatorSeries::new(period, values)
}

fn relative_strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Latest RSI value, if the series warmed up.
pub fn calculate_rsi(closes: &[f64], period: usize) -> Option<f64> {
    rsi_series(closes, period).last()
}
