//! F&O Edge signal service.
//!
//! Rule-based trade signal generation over OHLC candles (RSI, MACD, EMA),
//! exposed through an Axum HTTP API alongside chart and quote endpoints.

pub mod cache;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod signals;
