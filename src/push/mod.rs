//! The push event handler.
//!
//! [`PushNotificationPresenter`] is the application's handler for push
//! events. It derives the notification content synchronously, then asks the
//! configured displayer to show it and ties the event's lifetime to that
//! display settling.

pub mod error;
mod payload;

pub use error::PushError;
pub use payload::derive_notification_data;

use std::sync::Arc;

use crate::{
    config::NotificationConfig,
    context::AppMetrics,
    display::NotificationDisplayer,
    models::{NotificationOptions, PushEvent},
};

/// Handles push events by presenting them as notifications.
pub struct PushNotificationPresenter {
    displayer: Arc<dyn NotificationDisplayer>,
    config: NotificationConfig,
    metrics: AppMetrics,
}

impl PushNotificationPresenter {
    /// Creates a new `PushNotificationPresenter`.
    pub fn new(
        displayer: Arc<dyn NotificationDisplayer>,
        config: NotificationConfig,
        metrics: AppMetrics,
    ) -> Self {
        Self {
            displayer,
            config,
            metrics,
        }
    }

    /// Handles one push event.
    ///
    /// A malformed payload fails here, before anything is displayed and
    /// before the event's lifetime is extended. On success the display
    /// attempt is registered with the lifetime, so the worker waits for it
    /// to settle before shutting down. Display failures are recorded where
    /// they settle; they do not fail the handler.
    pub fn on_push(&self, event: PushEvent) -> Result<(), PushError> {
        let (data, lifetime) = event.into_parts();
        let notification = derive_notification_data(data.as_deref(), &self.config)?;

        let options = NotificationOptions {
            body: notification.body,
            icon: self.config.icon_url.clone(),
            badge: self.config.badge_url.clone(),
        };
        let title = notification.title;

        let displayer = Arc::clone(&self.displayer);
        let metrics = self.metrics.clone();
        eprintln!("DBG presenter: extending lifetime for show");
        lifetime.extend_until(async move {
            eprintln!("DBG presenter: show future polled");
            match displayer.show(&title, &options).await {
                Ok(()) => {
                    metrics.record_notification_displayed().await;
                    tracing::debug!(title = %title, "Notification displayed.");
                }
                Err(e) => {
                    metrics.record_display_failure().await;
                    tracing::error!(error = %e, title = %title, "Failed to display notification.");
                }
            }
        });

        Ok(())
    }
}
