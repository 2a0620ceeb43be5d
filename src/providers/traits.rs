//! This module defines the interface for fetching candle data from a market
//! data service.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::models::Candle;

/// Custom error type for market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// Error when building the request URL.
    #[error("Failed to build market data URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Error when talking to the market data service.
    #[error("Market data request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service answered with a body that does not match the chart
    /// schema.
    #[error("Malformed market data response: {0}")]
    MalformedResponse(String),

    /// The service answered but returned no usable candles for the symbol.
    #[error("No candle data returned for symbol '{0}'")]
    EmptySeries(String),

    /// The channel for communicating with a downstream service was closed
    /// unexpectedly.
    #[error("Channel closed")]
    ChannelClosed,
}

/// A trait for a data source that can fetch market data.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetches the candle series for a symbol at the given interval over the
    /// given range.
    async fn fetch_candles(
        &self,
        symbol: &str,
        interval: &str,
        range: &str,
    ) -> Result<Vec<Candle>, MarketDataError>;

    /// Fetches the most recent traded price for a symbol.
    async fn latest_quote(&self, symbol: &str) -> Result<f64, MarketDataError>;
}
