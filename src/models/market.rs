//! Data models for market data and trading signals.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single OHLCV candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    /// Opening time of the candle.
    pub timestamp: DateTime<Utc>,
    /// Opening price.
    pub open: f64,
    /// Highest traded price.
    pub high: f64,
    /// Lowest traded price.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume.
    pub volume: f64,
}

impl Candle {
    /// The price VWAP weights each candle by.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// The candle's full trading range, low to high.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// The five-tier trade stance derived from price relative to VWAP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Price above VWAP with the trend confirming.
    StrongLong,
    /// Price above VWAP against the trend.
    WeakLong,
    /// Price below VWAP with the trend confirming.
    StrongShort,
    /// Price below VWAP against the trend.
    WeakShort,
    /// Price pinned to VWAP, no directional edge.
    Wait,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::StrongLong => "STRONG LONG",
            Signal::WeakLong => "WEAK LONG",
            Signal::StrongShort => "STRONG SHORT",
            Signal::WeakShort => "WEAK SHORT",
            Signal::Wait => "WAIT",
        };
        write!(f, "{}", s)
    }
}

/// Direction of the fast moving average relative to the slow one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    /// Fast average above slow.
    Bullish,
    /// Fast average below slow.
    Bearish,
    /// Not enough data to compare the averages.
    Neutral,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrendDirection::Bullish => "BULLISH",
            TrendDirection::Bearish => "BEARISH",
            TrendDirection::Neutral => "NEUTRAL",
        };
        write!(f, "{}", s)
    }
}

/// Whether the volatility index sits above its alert level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VixStatus {
    /// Volatility index at or below the alert level.
    Calm,
    /// Volatility index above the alert level.
    Spiking,
}

impl fmt::Display for VixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VixStatus::Calm => "CALM",
            VixStatus::Spiking => "SPIKING",
        };
        write!(f, "{}", s)
    }
}

/// The outcome of evaluating one symbol's candles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalReading {
    /// The watchlist symbol the reading is for.
    pub symbol: String,
    /// The derived trade stance.
    pub signal: Signal,
    /// Last close at evaluation time.
    pub price: f64,
    /// Volume-weighted average price over the evaluated range.
    pub vwap: f64,
    /// Fast moving average of closes.
    pub sma_fast: f64,
    /// Slow moving average of closes.
    pub sma_slow: f64,
    /// Trend direction implied by the moving averages.
    pub trend: TrendDirection,
    /// Mean candle range over the volatility lookback.
    pub volatility: f64,
}

/// A volatility index level together with its classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VixReading {
    /// The index level.
    pub level: f64,
    /// Whether that level counts as spiking.
    pub status: VixStatus,
}
