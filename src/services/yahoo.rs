//! Yahoo Finance chart API provider.
//!
//! Calls the public v8 chart endpoint and flattens the columnar
//! payload into `PriceBar`s. Rows with any missing OHLCV value are
//! dropped, matching how the series would look after removing
//! incomplete rows upstream.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::PriceBar;
use crate::services::market_data::{MarketDataProvider, ProviderError};

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    open: Vec<Option<f64>>,
    high: Vec<Option<f64>>,
    low: Vec<Option<f64>>,
    close: Vec<Option<f64>>,
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

pub struct YahooProvider {
    client: reqwest::Client,
    base_url: String,
}

impl YahooProvider {
    /// Build a provider with a per-request timeout. A timed-out fetch
    /// behaves exactly like any other fetch failure.
    pub fn new(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint. Used by tests to
    /// route requests through a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn bars_from_chart(chart: ChartData) -> Result<Vec<PriceBar>, ProviderError> {
        let timestamps = match chart.timestamp {
            Some(ts) => ts,
            None => return Ok(Vec::new()),
        };
        let quote = chart
            .indicators
            .quote
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Malformed("no quote block in payload".into()))?;

        let mut bars = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.iter().enumerate() {
            let row = (
                quote.open.get(i).copied().flatten(),
                quote.high.get(i).copied().flatten(),
                quote.low.get(i).copied().flatten(),
                quote.close.get(i).copied().flatten(),
                quote.volume.get(i).copied().flatten(),
            );
            if let (Some(open), Some(high), Some(low), Some(close), Some(volume)) = row {
                let timestamp = Utc
                    .timestamp_opt(*ts, 0)
                    .single()
                    .ok_or_else(|| ProviderError::Malformed(format!("bad timestamp {}", ts)))?;
                bars.push(PriceBar::new(timestamp, open, high, low, close, volume));
            }
        }
        Ok(bars)
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        period: &str,
        interval: &str,
    ) -> Result<Vec<PriceBar>, ProviderError> {
        let url = format!(
            "{}/{}?range={}&interval={}",
            self.base_url, symbol, period, interval
        );

        let response: YahooResponse = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0")
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::Request(e.to_string()))?
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if let Some(error) = response.chart.error {
            return Err(ProviderError::Api {
                code: error.code,
                description: error.description,
            });
        }

        let chart = response
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| ProviderError::Malformed("empty chart result".into()))?;

        let bars = Self::bars_from_chart(chart)?;
        debug!(symbol = %symbol, count = bars.len(), "fetched price history");
        Ok(bars)
    }
}
