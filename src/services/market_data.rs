//! Market data provider interface.

use serde::{Deserialize, Serialize};

use crate::error::MarketDataError;
use crate::models::indicators::Candle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleInterval {
    #[serde(rename = "15minute")]
    FifteenMinute,
    #[serde(rename = "day")]
    Day,
}

impl CandleInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            CandleInterval::FifteenMinute => "15minute",
            CandleInterval::Day => "day",
        }
    }

    pub fn millis(&self) -> i64 {
        match self {
            CandleInterval::FifteenMinute => 15 * 60 * 1000,
            CandleInterval::Day => 24 * 60 * 60 * 1000,
        }
    }
}

/// Lookback of the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    OneDay,
    SevenDays,
    OneMonth,
    ThreeMonths,
}

impl TimeRange {
    /// Unknown or missing values fall back to the intraday view.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("7d") => TimeRange::SevenDays,
            Some("1m") => TimeRange::OneMonth,
            Some("3m") => TimeRange::ThreeMonths,
            _ => TimeRange::OneDay,
        }
    }

    pub fn interval(&self) -> CandleInterval {
        match self {
            TimeRange::OneDay => CandleInterval::FifteenMinute,
            _ => CandleInterval::Day,
        }
    }

    /// Number of candles covering the range. A trading session from 09:15 to
    /// 15:30 holds 26 fifteen-minute bars.
    pub fn points(&self) -> usize {
        match self {
            TimeRange::OneDay => 26,
            TimeRange::SevenDays => 7,
            TimeRange::OneMonth => 30,
            TimeRange::ThreeMonths => 90,
        }
    }
}

#[async_trait::async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Up to `limit` most recent candles for `symbol`, oldest first.
    async fn get_candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Last traded price, `None` when the source has no quote.
    async fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError>;
}
