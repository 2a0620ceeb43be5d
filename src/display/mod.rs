//! Notification display backends.
//!
//! A displayer takes a finished notification, a title plus its presentation
//! options, and puts it in front of the user. Which backend does that is a
//! deployment decision, so the worker only ever talks to the
//! [`NotificationDisplayer`] trait.

mod desktop;
pub mod error;
mod stdout;
mod webhook;

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

pub use desktop::DesktopDisplayer;
pub use error::DisplayError;
pub use stdout::StdoutDisplayer;
pub use webhook::WebhookDisplayer;

use crate::{
    config::{AppConfig, DisplayBackend},
    models::NotificationOptions,
};

/// A trait representing a backend that can display a notification to the
/// user.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait NotificationDisplayer: Send + Sync {
    /// Displays the notification, resolving once the attempt has settled.
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), DisplayError>;
}

/// Builds the displayer selected by the application configuration.
pub fn build_displayer(config: &AppConfig) -> Result<Arc<dyn NotificationDisplayer>, DisplayError> {
    match config.display.backend {
        DisplayBackend::Stdout => Ok(Arc::new(StdoutDisplayer::new())),
        DisplayBackend::Desktop => Ok(Arc::new(DesktopDisplayer::new())),
        DisplayBackend::Webhook => {
            let url = config.display.webhook_url.clone().ok_or_else(|| {
                DisplayError::ConfigError(
                    "display.webhook_url is required for the webhook backend".to_string(),
                )
            })?;
            Ok(Arc::new(WebhookDisplayer::new(url)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use url::Url;

    #[test]
    fn test_build_displayer_defaults_to_stdout() {
        let config = AppConfig::default();
        assert!(build_displayer(&config).is_ok());
    }

    #[test]
    fn test_build_displayer_webhook_requires_url() {
        let mut config = AppConfig::default();
        config.display = DisplayConfig {
            backend: DisplayBackend::Webhook,
            webhook_url: None,
        };
        let result = build_displayer(&config);
        assert!(matches!(result, Err(DisplayError::ConfigError(_))));

        config.display.webhook_url = Some(Url::parse("https://hooks.example.com/notify").unwrap());
        assert!(build_displayer(&config).is_ok());
    }
}
