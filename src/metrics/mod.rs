//! Prometheus metrics for the HTTP layer and signal generation.

use prometheus::{
    Encoder, Gauge, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

pub struct Metrics {
    registry: Registry,
    pub http_requests_total: IntCounter,
    pub http_request_duration_seconds: Histogram,
    pub http_requests_in_flight: IntGauge,
    pub signals_emitted_total: IntCounterVec,
    pub signal_fallbacks_total: IntCounterVec,
    pub signal_cache_hits_total: IntCounter,
    pub signal_cache_misses_total: IntCounter,
    pub redis_connected: Gauge,
}

impl Metrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let http_requests_total =
            IntCounter::new("http_requests_total", "Total number of HTTP requests")?;
        let http_request_duration_seconds = Histogram::with_opts(HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        ))?;
        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "Number of HTTP requests currently being served",
        )?;
        let signals_emitted_total = IntCounterVec::new(
            Opts::new("signals_emitted_total", "Trade signals emitted by the engine"),
            &["direction"],
        )?;
        let signal_fallbacks_total = IntCounterVec::new(
            Opts::new(
                "signal_fallbacks_total",
                "Times the default signal set was served instead of computed signals",
            ),
            &["reason"],
        )?;
        let signal_cache_hits_total =
            IntCounter::new("signal_cache_hits_total", "Signal cache hits")?;
        let signal_cache_misses_total =
            IntCounter::new("signal_cache_misses_total", "Signal cache misses")?;
        let redis_connected = Gauge::new("redis_connected", "1 when the Redis cache is in use")?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(signals_emitted_total.clone()))?;
        registry.register(Box::new(signal_fallbacks_total.clone()))?;
        registry.register(Box::new(signal_cache_hits_total.clone()))?;
        registry.register(Box::new(signal_cache_misses_total.clone()))?;
        registry.register(Box::new(redis_connected.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            signals_emitted_total,
            signal_fallbacks_total,
            signal_cache_hits_total,
            signal_cache_misses_total,
            redis_connected,
        })
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
