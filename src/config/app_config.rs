use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use super::{
    DisplayConfig, MarketConfig, NotificationConfig, SignalConfig,
    deserialize_duration_from_seconds,
};

/// Provides the default value for market_data_url.
fn default_market_data_url() -> Url {
    Url::parse("https://query1.finance.yahoo.com/v8/finance/chart/")
        .expect("default market data URL is valid")
}

/// Provides the default value for refresh_interval_secs.
fn default_refresh_interval_secs() -> Duration {
    Duration::from_secs(60)
}

/// Provides the default value for shutdown_timeout.
fn default_shutdown_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Provides the default value for push_channel_capacity.
fn default_push_channel_capacity() -> u32 {
    1024
}

/// Application configuration for Tocsin.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the candle chart endpoint. The symbol is appended as a
    /// path segment.
    #[serde(default = "default_market_data_url")]
    pub market_data_url: Url,

    /// The interval in seconds between market scans.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_refresh_interval_secs"
    )]
    pub refresh_interval_secs: Duration,

    /// The maximum time in seconds to wait for graceful shutdown.
    #[serde(
        deserialize_with = "deserialize_duration_from_seconds",
        default = "default_shutdown_timeout"
    )]
    pub shutdown_timeout: Duration,

    /// The capacity of the channel used for delivering push messages.
    #[serde(default = "default_push_channel_capacity")]
    pub push_channel_capacity: u32,

    /// Watchlist and candle request configuration.
    #[serde(default)]
    pub market: MarketConfig,

    /// Signal engine thresholds.
    #[serde(default)]
    pub signal: SignalConfig,

    /// Notification defaults and artwork.
    #[serde(default)]
    pub notification: NotificationConfig,

    /// Notification display backend configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            market_data_url: default_market_data_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            shutdown_timeout: default_shutdown_timeout(),
            push_channel_capacity: default_push_channel_capacity(),
            market: MarketConfig::default(),
            signal: SignalConfig::default(),
            notification: NotificationConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)))
            .add_source(Environment::with_prefix("TOCSIN").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn market_data_url(mut self, url: Url) -> Self {
        self.config.market_data_url = url;
        self
    }

    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.config.refresh_interval_secs = interval;
        self
    }

    pub fn shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.config.shutdown_timeout = timeout;
        self
    }

    pub fn push_channel_capacity(mut self, capacity: u32) -> Self {
        self.config.push_channel_capacity = capacity;
        self
    }

    pub fn watchlist(mut self, symbols: &[&str]) -> Self {
        self.config.market.watchlist = symbols.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn shadow_symbols(
        mut self,
        shadow_symbols: std::collections::HashMap<String, String>,
    ) -> Self {
        self.config.market.shadow_symbols = shadow_symbols;
        self
    }

    pub fn signal(mut self, signal: SignalConfig) -> Self {
        self.config.signal = signal;
        self
    }

    pub fn notification(mut self, notification: NotificationConfig) -> Self {
        self.config.notification = notification;
        self
    }

    pub fn display(mut self, display: DisplayConfig) -> Self {
        self.config.display = display;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .market_data_url(Url::parse("http://localhost:9999/chart/").unwrap())
            .refresh_interval(Duration::from_secs(5))
            .shutdown_timeout(Duration::from_secs(1))
            .push_channel_capacity(8)
            .watchlist(&["AAPL"])
            .build();

        assert_eq!(config.market_data_url.as_str(), "http://localhost:9999/chart/");
        assert_eq!(config.refresh_interval_secs, Duration::from_secs(5));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(1));
        assert_eq!(config.push_channel_capacity, 8);
        assert_eq!(config.market.watchlist, vec!["AAPL"]);
    }

    #[test]
    fn test_app_config_from_file() {
        // Create a temporary config file for testing
        let config_content = r#"
        refresh_interval_secs: 30
        shutdown_timeout: 10
        market:
          watchlist:
            - NQ=F
        display:
          backend: stdout
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let config = AppConfig::new(temp_dir.path().to_str()).unwrap();

        assert_eq!(config.refresh_interval_secs, Duration::from_secs(30));
        assert_eq!(config.shutdown_timeout, Duration::from_secs(10));
        assert_eq!(config.market.watchlist, vec!["NQ=F"]);
        // Sections absent from the file fall back to their defaults.
        assert_eq!(config.push_channel_capacity, 1024);
        assert_eq!(config.notification.default_title, "Market Alert");
    }

    #[test]
    fn test_app_config_env_override() {
        let config_content = r#"
        refresh_interval_secs: 30
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        std::env::set_var("TOCSIN__MARKET__VIX_SYMBOL", "VIXY");
        let config = AppConfig::new(temp_dir.path().to_str()).unwrap();
        std::env::remove_var("TOCSIN__MARKET__VIX_SYMBOL");

        assert_eq!(config.market.vix_symbol, "VIXY");
        assert_eq!(config.refresh_interval_secs, Duration::from_secs(30));
    }

    #[test]
    fn test_app_config_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = AppConfig::new(temp_dir.path().to_str());
        assert!(result.is_err());
    }
}
