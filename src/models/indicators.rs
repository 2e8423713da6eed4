use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLC bar. `timestamp` is epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub timestamp: i64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64, timestamp: i64) -> Self {
        Self {
            open,
            high,
            low,
            close,
            timestamp,
        }
    }

    /// A bar where every price equals `price`.
    pub fn flat(price: f64, timestamp: i64) -> Self {
        Self::new(price, price, price, price, timestamp)
    }

    pub fn is_finite(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// MACD line, its signal line and their difference at a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdPoint {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

impl MacdPoint {
    pub fn new(macd: f64, signal: f64) -> Self {
        Self {
            macd,
            signal,
            histogram: macd - signal,
        }
    }
}

/// Indicator readings at the newest fully aligned bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub ticker: String,
    pub timestamp: i64,
    pub close: f64,
    pub rsi: f64,
    pub macd: MacdPoint,
    pub ema_fast: f64,
    pub ema_slow: f64,
}
