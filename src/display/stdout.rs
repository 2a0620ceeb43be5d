use crate::{
    display::{DisplayError, NotificationDisplayer},
    models::NotificationOptions,
};

/// A displayer that prints notifications to standard output.
///
/// This is the default backend. It keeps headless deployments and the
/// dry-run command useful without a notification center.
#[derive(Debug, Default)]
pub struct StdoutDisplayer;

impl StdoutDisplayer {
    /// Creates a new `StdoutDisplayer`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NotificationDisplayer for StdoutDisplayer {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), DisplayError> {
        println!(
            "=== Notification: {} ===\n{}\nicon: {}\n",
            title, options.body, options.icon
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[tokio::test]
    async fn test_stdout_displayer_always_settles_ok() {
        let displayer = StdoutDisplayer::new();
        let options = NotificationOptions {
            body: "New Signal Detected!".to_string(),
            icon: Url::parse("https://example.com/icon.png").unwrap(),
            badge: Url::parse("https://example.com/badge.png").unwrap(),
        };
        assert!(displayer.show("Market Alert", &options).await.is_ok());
    }
}
