//! Main signal engine: candles in, ranked trade signals out.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::SignalError;
use crate::indicators::{closes, IndicatorSet};
use crate::models::indicators::{Candle, IndicatorSnapshot};
use crate::models::signal::TradeSignal;
use crate::signals::alignment::{align_recent, AlignedBar};
use crate::signals::assembler::{assemble, default_signals};
use crate::signals::decision::DecisionPolicy;

/// Why the default set was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    NoSignal,
    InsufficientData,
    MalformedCandle,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::NoSignal => "no_signal",
            FallbackReason::InsufficientData => "insufficient_data",
            FallbackReason::MalformedCandle => "malformed_candle",
        }
    }
}

impl From<&SignalError> for FallbackReason {
    fn from(err: &SignalError) -> Self {
        match err {
            SignalError::InsufficientData { .. } => FallbackReason::InsufficientData,
            SignalError::MalformedCandle { .. } => FallbackReason::MalformedCandle,
        }
    }
}

/// Signals plus whether they were computed or fell back to the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSet {
    pub signals: Vec<TradeSignal>,
    pub fallback: Option<FallbackReason>,
}

impl SignalSet {
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    pub fn into_signals(self) -> Vec<TradeSignal> {
        self.signals
    }
}

#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: EngineConfig,
    policy: DecisionPolicy,
}

impl Default for SignalEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SignalEngine {
    pub fn new(config: EngineConfig) -> Self {
        let policy = DecisionPolicy::new(&config);
        Self { config, policy }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Aligned bars over the scan window, newest first.
    pub fn recent_bars(&self, candles: &[Candle]) -> Result<Vec<AlignedBar>, SignalError> {
        if let Some(index) = candles.iter().position(|c| !c.is_finite()) {
            return Err(SignalError::MalformedCandle { index });
        }
        let indicators = IndicatorSet::compute(&closes(candles), &self.config);
        align_recent(candles, &indicators, &self.config)
    }

    /// Signals found in the scan window. An empty list means no bar qualified.
    pub fn generate(
        &self,
        ticker: &str,
        candles: &[Candle],
    ) -> Result<Vec<TradeSignal>, SignalError> {
        let bars = self.recent_bars(candles)?;
        let signals = assemble(&bars, &self.policy, ticker, self.config.max_signals);
        tracing::debug!(
            ticker = %ticker,
            candles = candles.len(),
            bars = bars.len(),
            signals = signals.len(),
            "Signal scan complete"
        );
        Ok(signals)
    }

    /// Like [`generate`](Self::generate), but never empty: no signal and
    /// unusable input both yield [`default_signals`].
    pub fn generate_or_default(&self, ticker: &str, candles: &[Candle]) -> SignalSet {
        match self.generate(ticker, candles) {
            Ok(signals) if !signals.is_empty() => SignalSet {
                signals,
                fallback: None,
            },
            Ok(_) => SignalSet {
                signals: default_signals(),
                fallback: Some(FallbackReason::NoSignal),
            },
            Err(e) => {
                tracing::warn!(ticker = %ticker, error = %e, "Serving default signals");
                SignalSet {
                    signals: default_signals(),
                    fallback: Some(FallbackReason::from(&e)),
                }
            }
        }
    }

    /// Indicator readings at the newest aligned bar.
    pub fn snapshot(
        &self,
        ticker: &str,
        candles: &[Candle],
    ) -> Result<IndicatorSnapshot, SignalError> {
        let bar = self
            .recent_bars(candles)?
            .into_iter()
            .next()
            .ok_or(SignalError::InsufficientData {
                available: candles.len(),
                required: self.config.warmup_candles().max(self.config.min_candles),
            })?;

        Ok(IndicatorSnapshot {
            ticker: ticker.to_string(),
            timestamp: bar.candle.timestamp,
            close: bar.candle.close,
            rsi: bar.rsi,
            macd: bar.macd,
            ema_fast: bar.ema_fast,
            ema_slow: bar.ema_slow,
        })
    }
}
