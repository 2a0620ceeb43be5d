//! Price series arithmetic used by the signal engine.

use crate::models::Candle;

/// Simple moving average of the last `period` values.
///
/// Returns `None` when the series is shorter than the period or the period
/// is zero.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let tail = &values[values.len() - period..];
    Some(tail.iter().sum::<f64>() / period as f64)
}

/// Volume-weighted average price across the whole series.
///
/// Weighs each candle's typical price by its volume. Returns `None` for an
/// empty series or one that traded no volume.
pub fn vwap(candles: &[Candle]) -> Option<f64> {
    let volume: f64 = candles.iter().map(|c| c.volume).sum();
    if candles.is_empty() || volume == 0.0 {
        return None;
    }
    let weighted: f64 = candles.iter().map(|c| c.typical_price() * c.volume).sum();
    Some(weighted / volume)
}

/// Mean candle range over the last `lookback` candles.
///
/// Uses as much of the series as exists when it is shorter than the
/// lookback. Returns `None` for an empty series or a zero lookback.
pub fn mean_range(candles: &[Candle], lookback: usize) -> Option<f64> {
    if candles.is_empty() || lookback == 0 {
        return None;
    }
    let tail = &candles[candles.len().saturating_sub(lookback)..];
    Some(tail.iter().map(Candle::range).sum::<f64>() / tail.len() as f64)
}
