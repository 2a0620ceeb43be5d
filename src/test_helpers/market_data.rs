//! A market data source that serves fixed candles, for tests.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{
    models::Candle,
    providers::{MarketDataError, MarketDataSource},
};

/// A `MarketDataSource` that serves pre-loaded candles and quotes.
///
/// Symbols without data produce an [`MarketDataError::EmptySeries`] error,
/// which doubles as the unavailable-symbol case in tests.
#[derive(Debug, Default)]
pub struct FixedMarketData {
    candles: HashMap<String, Vec<Candle>>,
    quotes: HashMap<String, f64>,
    requests: Mutex<Vec<String>>,
}

impl FixedMarketData {
    /// Creates an empty data source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `candles` for `symbol`, regardless of interval and range.
    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.candles.insert(symbol.to_string(), candles);
        self
    }

    /// Serves `level` as the latest quote for `symbol`.
    pub fn with_quote(mut self, symbol: &str, level: f64) -> Self {
        self.quotes.insert(symbol.to_string(), level);
        self
    }

    /// The symbols candle requests were made for, in request order.
    pub fn requested_symbols(&self) -> Vec<String> {
        self.requests.lock().expect("request log poisoned").clone()
    }
}

#[async_trait]
impl MarketDataSource for FixedMarketData {
    async fn fetch_candles(
        &self,
        symbol: &str,
        _interval: &str,
        _range: &str,
    ) -> Result<Vec<Candle>, MarketDataError> {
        self.requests
            .lock()
            .expect("request log poisoned")
            .push(symbol.to_string());
        self.candles
            .get(symbol)
            .cloned()
            .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))
    }

    async fn latest_quote(&self, symbol: &str) -> Result<f64, MarketDataError> {
        self.quotes
            .get(symbol)
            .copied()
            .ok_or_else(|| MarketDataError::EmptySeries(symbol.to_string()))
    }
}
