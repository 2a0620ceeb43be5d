use thiserror::Error;

use super::indicators;
use crate::{
    config::SignalConfig,
    models::{Candle, Signal, SignalReading, TrendDirection, VixStatus},
};

/// Defines the possible errors that can occur during signal evaluation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine was configured with thresholds that cannot classify
    /// anything.
    #[error("Invalid signal configuration: {0}")]
    InvalidConfiguration(String),

    /// The candle series is too short to evaluate.
    #[error("Not enough candles for '{symbol}': got {got}, need {need}")]
    InsufficientData {
        /// The symbol whose series fell short.
        symbol: String,
        /// How many candles the series had.
        got: usize,
        /// How many the evaluation needs.
        need: usize,
    },

    /// The candle series carries no traded volume, which leaves VWAP
    /// undefined.
    #[error("No traded volume in candle series for '{0}'")]
    NoVolume(String),
}

/// Derives trade stances from candle series.
///
/// The stance combines where price sits relative to VWAP with whether the
/// moving-average trend agrees. Price inside the volatility dead band around
/// VWAP is a wait regardless of trend.
#[derive(Debug, Clone)]
pub struct SignalEngine {
    config: SignalConfig,
}

impl SignalEngine {
    /// Creates a new `SignalEngine`, validating the thresholds.
    pub fn new(config: SignalConfig) -> Result<Self, EngineError> {
        if config.fast_period == 0 {
            return Err(EngineError::InvalidConfiguration(
                "fast_period must be at least 1".to_string(),
            ));
        }
        if config.fast_period >= config.slow_period {
            return Err(EngineError::InvalidConfiguration(format!(
                "fast_period ({}) must be shorter than slow_period ({})",
                config.fast_period, config.slow_period
            )));
        }
        if config.volatility_lookback == 0 {
            return Err(EngineError::InvalidConfiguration(
                "volatility_lookback must be at least 1".to_string(),
            ));
        }
        if config.dead_band_factor < 0.0 {
            return Err(EngineError::InvalidConfiguration(
                "dead_band_factor must not be negative".to_string(),
            ));
        }
        Ok(Self { config })
    }

    /// Evaluates one symbol's candle series into a signal reading.
    ///
    /// The series must cover at least the slow moving-average period.
    pub fn evaluate(&self, symbol: &str, candles: &[Candle]) -> Result<SignalReading, EngineError> {
        let need = self.config.slow_period;
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();

        let (Some(sma_fast), Some(sma_slow), Some(&price)) = (
            indicators::sma(&closes, self.config.fast_period),
            indicators::sma(&closes, self.config.slow_period),
            closes.last(),
        ) else {
            return Err(EngineError::InsufficientData {
                symbol: symbol.to_string(),
                got: candles.len(),
                need,
            });
        };

        let vwap = indicators::vwap(candles)
            .ok_or_else(|| EngineError::NoVolume(symbol.to_string()))?;
        let volatility =
            indicators::mean_range(candles, self.config.volatility_lookback).unwrap_or(0.0);

        let trend = if sma_fast > sma_slow {
            TrendDirection::Bullish
        } else {
            TrendDirection::Bearish
        };

        let dead_band = volatility * self.config.dead_band_factor;
        let signal = if (price - vwap).abs() < dead_band {
            Signal::Wait
        } else if price > vwap {
            match trend {
                TrendDirection::Bullish => Signal::StrongLong,
                _ => Signal::WeakLong,
            }
        } else {
            match trend {
                TrendDirection::Bearish => Signal::StrongShort,
                _ => Signal::WeakShort,
            }
        };

        Ok(SignalReading {
            symbol: symbol.to_string(),
            signal,
            price,
            vwap,
            sma_fast,
            sma_slow,
            trend,
            volatility,
        })
    }

    /// Trend direction for a candle series, for the multi-timeframe report.
    ///
    /// Unlike [`evaluate`](Self::evaluate), a series too short to compare
    /// the averages reads as neutral rather than an error.
    pub fn trend(&self, candles: &[Candle]) -> TrendDirection {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        match (
            indicators::sma(&closes, self.config.fast_period),
            indicators::sma(&closes, self.config.slow_period),
        ) {
            (Some(fast), Some(slow)) if fast > slow => TrendDirection::Bullish,
            (Some(_), Some(_)) => TrendDirection::Bearish,
            _ => TrendDirection::Neutral,
        }
    }

    /// Classifies a volatility index level.
    pub fn vix_status(&self, level: f64) -> VixStatus {
        if level > self.config.vix_alert_level {
            VixStatus::Spiking
        } else {
            VixStatus::Calm
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{candle_series, candle_series_with_spread};

    fn engine() -> SignalEngine {
        SignalEngine::new(SignalConfig::default()).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_thresholds() {
        let mut config = SignalConfig::default();
        config.fast_period = 0;
        assert!(matches!(
            SignalEngine::new(config),
            Err(EngineError::InvalidConfiguration(_))
        ));

        let mut config = SignalConfig::default();
        config.fast_period = 21;
        config.slow_period = 9;
        assert!(SignalEngine::new(config).is_err());

        let mut config = SignalConfig::default();
        config.volatility_lookback = 0;
        assert!(SignalEngine::new(config).is_err());

        let mut config = SignalConfig::default();
        config.dead_band_factor = -0.1;
        assert!(SignalEngine::new(config).is_err());
    }

    #[test]
    fn test_evaluate_requires_slow_period_of_candles() {
        let candles = candle_series(&[1.0; 20]);
        let result = engine().evaluate("NQ=F", &candles);
        assert!(matches!(
            result,
            Err(EngineError::InsufficientData { got: 20, need: 21, .. })
        ));
    }

    #[test]
    fn test_evaluate_rejects_series_without_volume() {
        let mut candles = candle_series(&[100.0; 25]);
        for candle in &mut candles {
            candle.volume = 0.0;
        }
        let result = engine().evaluate("NQ=F", &candles);
        assert!(matches!(result, Err(EngineError::NoVolume(_))));
    }

    #[test]
    fn test_strong_long_when_price_above_vwap_with_bullish_trend() {
        // Steadily rising closes: last price well above the series average,
        // fast average above slow.
        let closes: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        let reading = engine().evaluate("NQ=F", &candle_series(&closes)).unwrap();

        assert_eq!(reading.signal, Signal::StrongLong);
        assert_eq!(reading.trend, TrendDirection::Bullish);
        assert_eq!(reading.price, 30.0);
        assert!((reading.vwap - 15.5).abs() < 1e-9);
        assert!((reading.sma_fast - 26.0).abs() < 1e-9);
        assert!((reading.sma_slow - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_weak_long_when_price_pops_above_vwap_in_a_downtrend() {
        // Two dozen falling closes drag the averages down, then the last
        // print spikes above the series average.
        let mut closes: Vec<f64> = (0..24).map(|i| 100.0 - 2.0 * i as f64).collect();
        closes.push(80.0);
        let reading = engine().evaluate("ES=F", &candle_series(&closes)).unwrap();

        assert_eq!(reading.trend, TrendDirection::Bearish);
        assert!(reading.price > reading.vwap);
        assert_eq!(reading.signal, Signal::WeakLong);
    }

    #[test]
    fn test_strong_short_when_price_below_vwap_with_bearish_trend() {
        let mut closes: Vec<f64> = (0..24).map(|i| 100.0 - 2.0 * i as f64).collect();
        closes.push(50.0);
        let reading = engine().evaluate("ES=F", &candle_series(&closes)).unwrap();

        assert_eq!(reading.trend, TrendDirection::Bearish);
        assert!(reading.price < reading.vwap);
        assert_eq!(reading.signal, Signal::StrongShort);
    }

    #[test]
    fn test_weak_short_when_price_dips_below_vwap_in_an_uptrend() {
        let mut closes: Vec<f64> = (0..24).map(|i| 54.0 + 2.0 * i as f64).collect();
        closes.push(70.0);
        let reading = engine().evaluate("NQ=F", &candle_series(&closes)).unwrap();

        assert_eq!(reading.trend, TrendDirection::Bullish);
        assert!(reading.price < reading.vwap);
        assert_eq!(reading.signal, Signal::WeakShort);
    }

    #[test]
    fn test_wait_when_price_sits_inside_the_dead_band() {
        // Flat closes with a 2-point range: volatility 2, dead band 0.6,
        // price exactly on VWAP.
        let candles = candle_series_with_spread(&[100.0; 25], 1.0);
        let reading = engine().evaluate("NQ=F", &candles).unwrap();

        assert_eq!(reading.signal, Signal::Wait);
        assert!((reading.volatility - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_trend_is_neutral_for_short_series() {
        let candles = candle_series(&[1.0, 2.0, 3.0]);
        assert_eq!(engine().trend(&candles), TrendDirection::Neutral);

        let rising: Vec<f64> = (1..=30).map(|i| i as f64).collect();
        assert_eq!(
            engine().trend(&candle_series(&rising)),
            TrendDirection::Bullish
        );
    }

    #[test]
    fn test_vix_status_threshold_is_exclusive() {
        let engine = engine();
        assert_eq!(engine.vix_status(12.0), VixStatus::Calm);
        assert_eq!(engine.vix_status(20.0), VixStatus::Calm);
        assert_eq!(engine.vix_status(20.01), VixStatus::Spiking);
    }
}
