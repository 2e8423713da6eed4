//! Collaborators around the engine: market data sources and signal retrieval.

pub mod http_provider;
pub mod market_data;
pub mod signal_service;
pub mod synthetic;

pub use http_provider::HttpMarketDataProvider;
pub use market_data::{CandleInterval, MarketDataProvider, TimeRange};
pub use signal_service::SignalService;
pub use synthetic::SyntheticMarketDataProvider;
