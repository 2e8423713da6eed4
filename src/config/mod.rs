//! Environment-driven configuration for the engine and the API server.

use std::env;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TICKER: &str = "NIFTY_FUT";

/// Deployment environment, `sandbox` unless `ENVIRONMENT` says otherwise.
pub fn get_environment() -> String {
    env::var("ENVIRONMENT").unwrap_or_else(|_| "sandbox".to_string())
}

fn process_env(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Parsed value of `key`, or `default` when it is unset or does not parse.
fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Tunables of the signal engine.
///
/// Defaults reproduce the dashboard's fixed rule set: RSI(14), MACD(12, 26, 9),
/// EMA 12/26, a 20 bar scan window and at most 5 signals.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub rsi_period: usize,
    pub macd_fast_period: usize,
    pub macd_slow_period: usize,
    pub macd_signal_period: usize,
    pub ema_fast_period: usize,
    pub ema_slow_period: usize,
    pub scan_window: usize,
    pub max_signals: usize,
    pub min_candles: usize,
    pub buy_rsi_threshold: f64,
    pub sell_rsi_threshold: f64,
    pub buy_target_multiplier: f64,
    pub sell_target_multiplier: f64,
    pub buy_stop_multiplier: f64,
    pub sell_stop_multiplier: f64,
    pub base_confidence: f64,
    pub confidence_slope: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast_period: 12,
            macd_slow_period: 26,
            macd_signal_period: 9,
            ema_fast_period: 12,
            ema_slow_period: 26,
            scan_window: 20,
            max_signals: 5,
            min_candles: 30,
            buy_rsi_threshold: 40.0,
            sell_rsi_threshold: 60.0,
            buy_target_multiplier: 1.007,
            sell_target_multiplier: 0.993,
            buy_stop_multiplier: 0.996,
            sell_stop_multiplier: 1.004,
            base_confidence: 75.0,
            confidence_slope: 1.5,
        }
    }
}

impl EngineConfig {
    /// Defaults with the scan window, signal cap and candle floor overridable
    /// through `SIGNAL_SCAN_WINDOW`, `SIGNAL_MAX_SIGNALS` and `SIGNAL_MIN_CANDLES`.
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Same as [`EngineConfig::from_env`] with variables read through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            scan_window: parse_or(&lookup, "SIGNAL_SCAN_WINDOW", defaults.scan_window),
            max_signals: parse_or(&lookup, "SIGNAL_MAX_SIGNALS", defaults.max_signals),
            min_candles: parse_or(&lookup, "SIGNAL_MIN_CANDLES", defaults.min_candles),
            ..defaults
        }
    }

    /// Candles needed before every indicator has produced a value.
    pub fn warmup_candles(&self) -> usize {
        let macd = self.macd_fast_period.max(self.macd_slow_period)
            + self.macd_signal_period.saturating_sub(1);
        [self.rsi_period + 1, macd, self.ema_fast_period, self.ema_slow_period]
            .into_iter()
            .max()
            .unwrap_or(0)
    }
}

/// Settings for the HTTP server and its collaborators.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub cache_ttl: Duration,
    pub redis_url: Option<String>,
    pub market_data_url: Option<String>,
    pub default_ticker: String,
    pub candle_limit: usize,
    pub engine: EngineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cache_ttl: Duration::from_secs(60),
            redis_url: None,
            market_data_url: None,
            default_ticker: DEFAULT_TICKER.to_string(),
            candle_limit: 100,
            engine: EngineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(process_env)
    }

    /// Unset, blank or unparsable variables keep their default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            cache_ttl: Duration::from_secs(parse_or(
                &lookup,
                "SIGNAL_CACHE_TTL_SECONDS",
                defaults.cache_ttl.as_secs(),
            )),
            redis_url: non_empty(&lookup, "REDIS_URL"),
            market_data_url: non_empty(&lookup, "MARKET_DATA_URL"),
            default_ticker: non_empty(&lookup, "DEFAULT_TICKER")
                .unwrap_or(defaults.default_ticker),
            candle_limit: parse_or(&lookup, "CANDLE_LIMIT", defaults.candle_limit),
            engine: EngineConfig::from_lookup(&lookup),
        }
    }
}
