use serde::Deserialize;

/// Configuration for the signal engine thresholds.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SignalConfig {
    /// Period of the fast moving average.
    #[serde(default = "default_fast_period")]
    pub fast_period: usize,

    /// Period of the slow moving average. Must be greater than `fast_period`.
    #[serde(default = "default_slow_period")]
    pub slow_period: usize,

    /// Number of trailing candles averaged to estimate volatility.
    #[serde(default = "default_volatility_lookback")]
    pub volatility_lookback: usize,

    /// Fraction of the volatility estimate inside which price is considered
    /// pinned to VWAP and no directional signal fires.
    #[serde(default = "default_dead_band_factor")]
    pub dead_band_factor: f64,

    /// VIX level above which volatility is reported as spiking.
    #[serde(default = "default_vix_alert_level")]
    pub vix_alert_level: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            fast_period: default_fast_period(),
            slow_period: default_slow_period(),
            volatility_lookback: default_volatility_lookback(),
            dead_band_factor: default_dead_band_factor(),
            vix_alert_level: default_vix_alert_level(),
        }
    }
}

fn default_fast_period() -> usize {
    9
}

fn default_slow_period() -> usize {
    21
}

fn default_volatility_lookback() -> usize {
    10
}

fn default_dead_band_factor() -> f64 {
    0.3
}

fn default_vix_alert_level() -> f64 {
    20.0
}
