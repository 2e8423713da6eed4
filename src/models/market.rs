use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::indicators::Candle;

/// A `{date, value}` point as consumed by the performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn at(date: DateTime<Utc>, value: f64) -> Self {
        Self {
            date: date.to_rfc3339_opts(SecondsFormat::Millis, true),
            value,
        }
    }

    pub fn from_candle(candle: &Candle) -> Option<Self> {
        candle.datetime().map(|date| Self::at(date, candle.close))
    }
}
