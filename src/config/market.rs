use serde::Deserialize;
use std::collections::HashMap;

/// A candle interval and range pair used for multi-timeframe trend reads.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TimeframeProfile {
    /// Human-readable label, e.g. `"1h"` or `"1d"`.
    pub label: String,
    /// Candle interval requested from the data source.
    pub interval: String,
    /// Lookback range requested from the data source.
    pub range: String,
}

/// Configuration for which instruments are watched and how their candles are
/// requested.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MarketConfig {
    /// Symbols scanned every refresh cycle.
    #[serde(default = "default_watchlist")]
    pub watchlist: Vec<String>,

    /// Symbol used to read the volatility index level.
    #[serde(default = "default_vix_symbol")]
    pub vix_symbol: String,

    /// Liquid proxies substituted for symbols the data source cannot serve
    /// directly, e.g. futures contracts shadowed by their tracking ETFs.
    #[serde(default = "default_shadow_symbols")]
    pub shadow_symbols: HashMap<String, String>,

    /// Candle interval for the signal scan.
    #[serde(default = "default_candle_interval")]
    pub candle_interval: String,

    /// Candle lookback range for the signal scan.
    #[serde(default = "default_candle_range")]
    pub candle_range: String,

    /// Longer timeframes reported alongside the scan signal.
    #[serde(default = "default_trend_profiles")]
    pub trend_profiles: Vec<TimeframeProfile>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            watchlist: default_watchlist(),
            vix_symbol: default_vix_symbol(),
            shadow_symbols: default_shadow_symbols(),
            candle_interval: default_candle_interval(),
            candle_range: default_candle_range(),
            trend_profiles: default_trend_profiles(),
        }
    }
}

impl MarketConfig {
    /// Resolves a watchlist symbol to the symbol actually requested from the
    /// data source, substituting a shadow symbol when one is configured.
    pub fn resolve_symbol<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.shadow_symbols
            .get(symbol)
            .map(String::as_str)
            .unwrap_or(symbol)
    }
}

fn default_watchlist() -> Vec<String> {
    vec!["NQ=F".to_string(), "ES=F".to_string()]
}

fn default_vix_symbol() -> String {
    "^VIX".to_string()
}

fn default_shadow_symbols() -> HashMap<String, String> {
    HashMap::from([
        ("NQ=F".to_string(), "QQQ".to_string()),
        ("ES=F".to_string(), "SPY".to_string()),
    ])
}

fn default_candle_interval() -> String {
    "5m".to_string()
}

fn default_candle_range() -> String {
    "2d".to_string()
}

fn default_trend_profiles() -> Vec<TimeframeProfile> {
    vec![
        TimeframeProfile {
            label: "1h".to_string(),
            interval: "1h".to_string(),
            range: "5d".to_string(),
        },
        TimeframeProfile {
            label: "1d".to_string(),
            interval: "1d".to_string(),
            range: "1mo".to_string(),
        },
    ]
}
