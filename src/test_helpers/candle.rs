//! Helpers for building candle series in tests.

use chrono::{Duration, TimeZone, Utc};

use crate::models::Candle;

/// Builds a series of flat candles (high = low = close) at unit volume,
/// spaced a minute apart.
pub fn candle_series(closes: &[f64]) -> Vec<Candle> {
    candle_series_with_spread(closes, 0.0)
}

/// Builds a candle series with `spread` above and below each close, at unit
/// volume. The typical price stays equal to the close.
pub fn candle_series_with_spread(closes: &[f64], spread: f64) -> Vec<Candle> {
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            timestamp: start + Duration::minutes(i as i64),
            open: close,
            high: close + spread,
            low: close - spread,
            close,
            volume: 1.0,
        })
        .collect()
}
