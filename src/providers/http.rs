//! This module provides a `MarketDataSource` backed by an HTTP chart API.
//!
//! The endpoint is expected to answer `GET {base}/{symbol}?interval=..&range=..`
//! with the usual chart envelope: parallel arrays of timestamps and OHLCV
//! values, where halted or partial bars appear as nulls.

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, header};
use serde::Deserialize;
use url::Url;

use super::traits::{MarketDataError, MarketDataSource};
use crate::models::Candle;

/// User agent sent with every chart request. Public chart endpoints reject
/// anonymous clients.
const USER_AGENT: &str = concat!("tocsin/", env!("CARGO_PKG_VERSION"));

/// A `MarketDataSource` implementation that fetches candles over HTTP.
#[derive(Debug, Clone)]
pub struct HttpMarketDataSource {
    base_url: Url,
    client: Client,
}

impl HttpMarketDataSource {
    /// Creates a new `HttpMarketDataSource` against the given chart API base
    /// URL.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl MarketDataSource for HttpMarketDataSource {
    #[tracing::instrument(skip(self), level = "debug")]
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Candle>, MarketDataError> {
        tracing::debug!(symbol, interval, range, "Fetching candle series.");
        let url = self.base_url.join(symbol)?;

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, USER_AGENT)
            .query(&[("interval", interval), ("range", range)])
            .send()
            .await?
            .error_for_status()?;

        let body: ChartResponse = response.json().await?;
        let candles = convert_chart(symbol, body)?;
        tracing::debug!(symbol, count = candles.len(), "Fetched candle series.");
        Ok(candles)
    }

    #[tracing::instrument(skip(self), level = "debug")]
    async fn latest_quote(&self, symbol: &str) -> Result<f64, MarketDataError> {
        let candles = self.fetch_candles(symbol, "1m", "1d").await?;
        candles
            .last()
            .map(|c| c.close)
            .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize, Default)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Turns a chart envelope into a candle series, dropping bars with missing
/// fields.
fn convert_chart(symbol: &str, response: ChartResponse) -> Result<Vec<Candle>, MarketDataError> {
    if let Some(error) = response.chart.error {
        return Err(MarketDataError::MalformedResponse(format!(
            "{}: {}",
            error.code, error.description
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|mut results| {
            if results.is_empty() {
                None
            } else {
                Some(results.remove(0))
            }
        })
        .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))?;

    let quote = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))?;

    let mut candles = Vec::with_capacity(result.timestamp.len());
    for (i, ts) in result.timestamp.iter().enumerate() {
        let row = (
            DateTime::from_timestamp(*ts, 0),
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
            value_at(&quote.volume, i),
        );
        if let (Some(timestamp), Some(open), Some(high), Some(low), Some(close), Some(volume)) = row
        {
            candles.push(Candle {
                timestamp,
                open,
                high,
                low,
                close,
                volume,
            });
        }
    }

    if candles.is_empty() {
        return Err(MarketDataError::EmptySeries(symbol.to_string()));
    }
    Ok(candles)
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ChartResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_convert_chart_builds_candles() {
        let response = parse(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1700000000, 1700000060],
                        "indicators": {
                            "quote": [{
                                "open": [10.0, 11.0],
                                "high": [12.0, 13.0],
                                "low": [9.0, 10.5],
                                "close": [11.0, 12.5],
                                "volume": [100, 250]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let candles = convert_chart("NQ=F", response).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].close, 11.0);
        assert_eq!(candles[1].volume, 250.0);
        assert_eq!(candles[0].timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn test_convert_chart_drops_bars_with_missing_fields() {
        let response = parse(
            r#"{
                "chart": {
                    "result": [{
                        "timestamp": [1700000000, 1700000060, 1700000120],
                        "indicators": {
                            "quote": [{
                                "open": [10.0, null, 11.0],
                                "high": [12.0, null, 13.0],
                                "low": [9.0, null, 10.5],
                                "close": [11.0, null, 12.5],
                                "volume": [100, null, 250]
                            }]
                        }
                    }],
                    "error": null
                }
            }"#,
        );

        let candles = convert_chart("NQ=F", response).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[1].close, 12.5);
    }

    #[test]
    fn test_convert_chart_surfaces_service_errors() {
        let response = parse(
            r#"{
                "chart": {
                    "result": null,
                    "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}
                }
            }"#,
        );

        let result = convert_chart("BOGUS", response);
        assert!(matches!(result, Err(MarketDataError::MalformedResponse(_))));
    }

    #[test]
    fn test_convert_chart_empty_result_is_an_empty_series() {
        let response = parse(r#"{"chart": {"result": [], "error": null}}"#);
        let result = convert_chart("NQ=F", response);
        assert!(matches!(result, Err(MarketDataError::EmptySeries(_))));
    }
}
