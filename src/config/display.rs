use serde::Deserialize;
use url::Url;

/// Which notification backend the worker hands finished alerts to.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayBackend {
    /// Print notifications to standard output.
    #[default]
    Stdout,
    /// Show notifications through the operating system notification center.
    Desktop,
    /// POST notifications as JSON to a configured endpoint.
    Webhook,
}

/// Configuration for the notification display backend.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct DisplayConfig {
    /// The backend to display notifications with.
    #[serde(default)]
    pub backend: DisplayBackend,

    /// Endpoint for the `webhook` backend. Required when that backend is
    /// selected, ignored otherwise.
    #[serde(default)]
    pub webhook_url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::Config;

    #[test]
    fn test_display_config_default() {
        let config = DisplayConfig::default();
        assert_eq!(config.backend, DisplayBackend::Stdout);
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_display_config_webhook_yaml() {
        let yaml = "
            backend: webhook
            webhook_url: https://hooks.example.com/notify
        ";

        let builder =
            Config::builder().add_source(config::File::from_str(yaml, config::FileFormat::Yaml));
        let config: DisplayConfig = builder.build().unwrap().try_deserialize().unwrap();

        assert_eq!(config.backend, DisplayBackend::Webhook);
        assert_eq!(
            config.webhook_url.unwrap().as_str(),
            "https://hooks.example.com/notify"
        );
    }

    #[test]
    fn test_display_config_rejects_unknown_backend() {
        let yaml = "backend: carrier_pigeon";

        let builder =
            Config::builder().add_source(config::File::from_str(yaml, config::FileFormat::Yaml));
        let result: Result<DisplayConfig, _> = builder.build().unwrap().try_deserialize();
        assert!(result.is_err());
    }
}
