//! Signal generation: alignment, decision rules, assembly.

pub mod alignment;
pub mod assembler;
pub mod decision;
pub mod engine;

pub use alignment::{align_recent, AlignedBar};
pub use assembler::{assemble, default_signals};
pub use decision::{round_price, DecisionPolicy, SignalDecision};
pub use engine::{FallbackReason, SignalEngine, SignalSet};
