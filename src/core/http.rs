//! HTTP endpoint server using Axum

use axum::{
    extract::{Query, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{Json, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};

use crate::cache::{InMemorySignalCache, RedisCache, SignalCache};
use crate::config::ServerConfig;
use crate::error::ServiceError;
use crate::metrics::Metrics;
use crate::models::indicators::IndicatorSnapshot;
use crate::models::market::ChartPoint;
use crate::models::signal::TradeSignal;
use crate::services::{
    HttpMarketDataProvider, MarketDataProvider, SignalService, SyntheticMarketDataProvider,
    TimeRange,
};
use crate::signals::engine::SignalEngine;

#[derive(Clone)]
pub struct AppState {
    pub health: Arc<RwLock<HealthStatus>>,
    pub metrics: Arc<Metrics>,
    pub start_time: Arc<Instant>,
    pub signals: Arc<SignalService>,
    pub default_ticker: String,
}

#[derive(Clone, Debug)]
pub struct HealthStatus {
    pub status: String,
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({ "message": message })))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let health = state.health.read().await;
    let uptime_seconds = state.start_time.elapsed().as_secs();
    Ok(Json(json!({
        "status": health.status,
        "uptime_seconds": uptime_seconds,
        "service": "fnoedge-signal-service"
    })))
}

pub async fn metrics_handler(State(state): State<AppState>) -> Result<String, StatusCode> {
    state
        .metrics
        .export()
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Middleware to track HTTP request metrics
async fn metrics_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    state.metrics.http_requests_in_flight.inc();

    let response = next.run(request).await;
    let status = response.status();
    let duration = start.elapsed();

    state.metrics.http_requests_in_flight.dec();
    state.metrics.http_requests_total.inc();
    state
        .metrics
        .http_request_duration_seconds
        .observe(duration.as_secs_f64());

    if status.is_server_error() {
        error!(
            method = %method,
            path = %path,
            status = %status,
            duration_ms = duration.as_millis(),
            "HTTP request error"
        );
    }

    response
}

#[derive(Debug, Deserialize)]
struct TickerQuery {
    ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PerformanceQuery {
    #[serde(rename = "timeRange")]
    time_range: Option<String>,
    instrument: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteQuery {
    instrument: Option<String>,
}

/// Trade signals for a ticker, falling back to the default set
async fn get_signals(
    State(state): State<AppState>,
    Query(params): Query<TickerQuery>,
) -> Result<Json<Vec<TradeSignal>>, ApiError> {
    let ticker = non_empty(params.ticker).unwrap_or_else(|| state.default_ticker.clone());

    let signals = state.signals.signals_for(&ticker).await.map_err(|e| {
        error!(error = %e, ticker = %ticker, "Error generating signals");
        api_error(StatusCode::INTERNAL_SERVER_ERROR, "Error generating signals")
    })?;

    Ok(Json(signals))
}

/// Indicator readings at the newest aligned bar
async fn get_indicators(
    State(state): State<AppState>,
    Query(params): Query<TickerQuery>,
) -> Result<Json<IndicatorSnapshot>, ApiError> {
    let ticker = non_empty(params.ticker).unwrap_or_else(|| state.default_ticker.clone());

    let snapshot = state
        .signals
        .snapshot_for(&ticker)
        .await
        .map_err(|e| match e {
            ServiceError::Signal(e) => {
                warn!(error = %e, ticker = %ticker, "Indicators unavailable");
                api_error(StatusCode::UNPROCESSABLE_ENTITY, &e.to_string())
            }
            ServiceError::MarketData(e) => {
                error!(error = %e, ticker = %ticker, "Error fetching indicators");
                api_error(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching indicators")
            }
        })?;

    Ok(Json(snapshot))
}

/// Close prices for the performance chart
async fn get_performance(
    State(state): State<AppState>,
    Query(params): Query<PerformanceQuery>,
) -> Result<Json<Vec<ChartPoint>>, ApiError> {
    let range = TimeRange::from_param(params.time_range.as_deref());
    let instrument = non_empty(params.instrument).unwrap_or_else(|| state.default_ticker.clone());

    let candles = state
        .signals
        .provider()
        .get_candles(&instrument, range.interval(), range.points())
        .await
        .map_err(|e| {
            error!(error = %e, instrument = %instrument, "Error fetching performance data");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching performance data",
            )
        })?;

    Ok(Json(
        candles.iter().filter_map(ChartPoint::from_candle).collect(),
    ))
}

/// Latest traded price as a chart point
async fn get_quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteQuery>,
) -> Result<Json<ChartPoint>, ApiError> {
    let instrument = non_empty(params.instrument).ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            "Instrument query parameter is required",
        )
    })?;

    let price = state
        .signals
        .provider()
        .get_latest_price(&instrument)
        .await
        .map_err(|e| {
            error!(error = %e, instrument = %instrument, "Error fetching quote");
            api_error(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching quote")
        })?;

    match price {
        Some(value) if value > 0.0 => Ok(Json(ChartPoint::at(Utc::now(), value))),
        _ => Err(api_error(StatusCode::NOT_FOUND, "Could not fetch quote")),
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route("/api/signals", get(get_signals))
        .route("/api/indicators", get(get_indicators))
        .route("/api/performance", get(get_performance))
        .route("/api/quote", get(get_quote))
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::DEBUG))
                        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                        .on_response(DefaultOnResponse::new().level(Level::DEBUG)),
                )
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    metrics_middleware,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn build_provider(
    config: &ServerConfig,
) -> Result<Arc<dyn MarketDataProvider>, Box<dyn std::error::Error>> {
    match &config.market_data_url {
        Some(url) => {
            info!(url = %url, "Using HTTP market data provider");
            Ok(Arc::new(HttpMarketDataProvider::new(url)?))
        }
        None => {
            warn!("MARKET_DATA_URL not set - serving synthetic market data");
            Ok(Arc::new(SyntheticMarketDataProvider::default()))
        }
    }
}

async fn build_cache(config: &ServerConfig, metrics: &Metrics) -> Arc<dyn SignalCache> {
    if let Some(redis_url) = &config.redis_url {
        match RedisCache::connect(redis_url, config.cache_ttl).await {
            Ok(cache) => {
                info!("Redis signal cache connected");
                metrics.redis_connected.set(1.0);
                return Arc::new(cache);
            }
            Err(e) => {
                warn!(error = %e, "Failed to connect to Redis - falling back to in-memory signal cache");
            }
        }
    }
    Arc::new(InMemorySignalCache::new(config.cache_ttl))
}

pub async fn build_state(config: &ServerConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let metrics = Arc::new(Metrics::new()?);
    let provider = build_provider(config)?;
    let cache = build_cache(config, &metrics).await;

    let signals = SignalService::new(
        provider,
        cache,
        SignalEngine::new(config.engine.clone()),
        config.candle_limit,
    )
    .with_metrics(metrics.clone());

    Ok(AppState {
        health: Arc::new(RwLock::new(HealthStatus::default())),
        metrics,
        start_time: Arc::new(Instant::now()),
        signals: Arc::new(signals),
        default_ticker: config.default_ticker.clone(),
    })
}

/// Serve until ctrl-c.
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config).await?;
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;

    info!(port = config.port, "HTTP server listening on port {}", config.port);
    info!(
        "Metrics endpoint available at http://0.0.0.0:{}/metrics",
        config.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
