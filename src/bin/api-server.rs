//! F&O Edge API Server
//!
//! HTTP API serving trade signals, indicator snapshots, chart data and quotes.
//! Signal sets are memoized in Redis when `REDIS_URL` is set, in process
//! memory otherwise.

use dotenvy::dotenv;
use fnoedge::config::{get_environment, ServerConfig};
use fnoedge::core::http::start_server;
use fnoedge::logging;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = ServerConfig::from_env();
    let env = get_environment();
    info!("Starting F&O Edge API Server");
    info!(environment = %env, "Environment");
    info!(
        port = config.port,
        cache_ttl_seconds = config.cache_ttl.as_secs(),
        default_ticker = %config.default_ticker,
        "HTTP Server: http://0.0.0.0:{}",
        config.port
    );

    if let Err(e) = start_server(config).await {
        error!(error = %e, "HTTP server error");
        return Err(e);
    }

    info!("API server stopped");
    Ok(())
}
