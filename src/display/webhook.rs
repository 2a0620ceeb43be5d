//! Webhook display implementation.
//!
//! Forwards notifications as JSON to a configured endpoint, for deployments
//! where something else owns the screen, such as a chat bridge or a phone
//! relay.

use reqwest::Client;
use url::Url;

use crate::{
    display::{DisplayError, NotificationDisplayer},
    models::NotificationOptions,
};

/// A displayer that POSTs notifications to a webhook endpoint.
#[derive(Debug, Clone)]
pub struct WebhookDisplayer {
    url: Url,
    client: Client,
}

impl WebhookDisplayer {
    /// Creates a new `WebhookDisplayer` pointed at the given endpoint.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            client: Client::new(),
        }
    }
}

#[async_trait::async_trait]
impl NotificationDisplayer for WebhookDisplayer {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), DisplayError> {
        let payload = serde_json::json!({
            "title": title,
            "options": options,
        });

        let response = self
            .client
            .post(self.url.clone())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DisplayError::DisplayFailed(format!(
                "Webhook returned status {status}"
            )));
        }
        Ok(())
    }
}
