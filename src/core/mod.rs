//! Core application primitives (HTTP server)

pub mod http;

pub use http::*;
