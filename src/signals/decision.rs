//! Per-bar BUY/SELL decision rules.

use crate::config::EngineConfig;
use crate::models::signal::{SignalDirection, TradeSignal};
use crate::signals::alignment::AlignedBar;

/// Round half away from zero to two decimals.
pub fn round_price(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

/// A qualifying bar's recommendation, before it is numbered and labelled.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalDecision {
    pub direction: SignalDirection,
    pub confidence: u8,
    pub entry_price: f64,
    pub target_price: f64,
    pub stop_loss: f64,
    pub reasoning: String,
}

impl SignalDecision {
    pub fn into_signal(self, id: u32, ticker: &str) -> TradeSignal {
        TradeSignal {
            id,
            ticker: ticker.to_string(),
            signal: self.direction,
            confidence: self.confidence,
            entry_price: self.entry_price,
            target_price: self.target_price,
            stop_loss: self.stop_loss,
            reasoning: self.reasoning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DecisionPolicy {
    buy_rsi_threshold: f64,
    sell_rsi_threshold: f64,
    buy_target_multiplier: f64,
    sell_target_multiplier: f64,
    buy_stop_multiplier: f64,
    sell_stop_multiplier: f64,
    base_confidence: f64,
    confidence_slope: f64,
}

impl Default for DecisionPolicy {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

impl DecisionPolicy {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            buy_rsi_threshold: config.buy_rsi_threshold,
            sell_rsi_threshold: config.sell_rsi_threshold,
            buy_target_multiplier: config.buy_target_multiplier,
            sell_target_multiplier: config.sell_target_multiplier,
            buy_stop_multiplier: config.buy_stop_multiplier,
            sell_stop_multiplier: config.sell_stop_multiplier,
            base_confidence: config.base_confidence,
            confidence_slope: config.confidence_slope,
        }
    }

    /// BUY needs RSI under the buy threshold with bullish MACD and EMA; SELL
    /// is the mirror image. Both comparisons are strict.
    pub fn direction(&self, bar: &AlignedBar) -> Option<SignalDirection> {
        let macd = bar.macd;
        if bar.rsi < self.buy_rsi_threshold
            && macd.macd > macd.signal
            && bar.ema_fast > bar.ema_slow
        {
            Some(SignalDirection::Buy)
        } else if bar.rsi > self.sell_rsi_threshold
            && macd.macd < macd.signal
            && bar.ema_fast < bar.ema_slow
        {
            Some(SignalDirection::Sell)
        } else {
            None
        }
    }

    /// `floor(base + distance * slope)`, clamped to 0..=100.
    pub fn confidence(&self, distance_from_threshold: f64) -> u8 {
        let raw = (self.base_confidence + distance_from_threshold * self.confidence_slope).floor();
        raw.clamp(0.0, 100.0) as u8
    }

    pub fn evaluate(&self, bar: &AlignedBar) -> Option<SignalDecision> {
        let direction = self.direction(bar)?;
        let close = bar.candle.close;

        let (distance, target_multiplier, stop_multiplier, reasoning) = match direction {
            SignalDirection::Buy => (
                self.buy_rsi_threshold - bar.rsi,
                self.buy_target_multiplier,
                self.buy_stop_multiplier,
                format!(
                    "RSI at {:.1} suggests it's nearing oversold. A bullish MACD crossover combined with a positive EMA trend indicates potential upward momentum.",
                    bar.rsi
                ),
            ),
            SignalDirection::Sell => (
                bar.rsi - self.sell_rsi_threshold,
                self.sell_target_multiplier,
                self.sell_stop_multiplier,
                format!(
                    "RSI at {:.1} suggests it's nearing overbought. A bearish MACD crossover with a negative EMA trend indicates potential downward pressure.",
                    bar.rsi
                ),
            ),
        };

        Some(SignalDecision {
            direction,
            confidence: self.confidence(distance),
            entry_price: round_price(close),
            target_price: round_price(close * target_multiplier),
            stop_loss: round_price(close * stop_multiplier),
            reasoning,
        })
    }
}
