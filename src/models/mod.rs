//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod market;
pub mod signal;

pub use indicators::{Candle, IndicatorSnapshot, MacdPoint};
pub use market::ChartPoint;
pub use signal::{SignalDirection, TradeSignal};
