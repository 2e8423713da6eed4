//! REST market data collector client.
//!
//! Expects `GET {base}/instruments/historical?symbol=&interval=&limit=` to
//! return a JSON candle array and `GET {base}/quote?instrument=` to return
//! `{"last_price": number | null}`.

use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::error::MarketDataError;
use crate::models::indicators::Candle;
use crate::services::market_data::{CandleInterval, MarketDataProvider};

const DEFAULT_MAX_RETRIES: usize = 3;

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    last_price: Option<f64>,
}

pub struct HttpMarketDataProvider {
    base_url: Url,
    client: reqwest::Client,
    max_retries: usize,
}

impl HttpMarketDataProvider {
    pub fn new(base_url: &str) -> Result<Self, MarketDataError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, MarketDataError> {
        let mut base_url = Url::parse(base_url)?;
        // `Url::join` replaces the last segment unless the path ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            client,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }

    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, MarketDataError> {
        let mut url = self.base_url.join(path)?;
        url.query_pairs_mut().extend_pairs(query);
        Ok(url)
    }

    async fn fetch_once<T: DeserializeOwned>(&self, url: &Url) -> Result<T, MarketDataError> {
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::Status {
                status: status.as_u16(),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| MarketDataError::Decode(e.to_string()))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, MarketDataError> {
        (|| self.fetch_once::<T>(url))
            .retry(
                ExponentialBuilder::default()
                    .with_min_delay(Duration::from_millis(50))
                    .with_max_times(self.max_retries),
            )
            .when(|e: &MarketDataError| e.is_retryable())
            .notify(|e: &MarketDataError, delay: Duration| {
                warn!(error = %e, delay_ms = delay.as_millis() as u64, path = url.path(), "Retrying market data request");
            })
            .await
    }
}

#[async_trait::async_trait]
impl MarketDataProvider for HttpMarketDataProvider {
    async fn get_candles(
        &self,
        symbol: &str,
        interval: CandleInterval,
        limit: usize,
    ) -> Result<Vec<Candle>, MarketDataError> {
        let limit_param = limit.to_string();
        let url = self.endpoint(
            "instruments/historical",
            &[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", limit_param.as_str()),
            ],
        )?;

        let mut candles: Vec<Candle> = self.fetch_json(&url).await?;
        if candles.is_empty() {
            return Err(MarketDataError::Unavailable(symbol.to_string()));
        }
        candles.sort_by_key(|c| c.timestamp);
        if candles.len() > limit {
            candles.drain(..candles.len() - limit);
        }

        debug!(symbol = %symbol, interval = interval.as_str(), count = candles.len(), "Fetched candles");
        Ok(candles)
    }

    async fn get_latest_price(&self, symbol: &str) -> Result<Option<f64>, MarketDataError> {
        let url = self.endpoint("quote", &[("instrument", symbol)])?;
        let quote: QuoteResponse = self.fetch_json(&url).await?;
        Ok(quote.last_price)
    }
}
