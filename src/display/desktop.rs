use tokio::task;

use crate::{
    display::{DisplayError, NotificationDisplayer},
    models::NotificationOptions,
};

/// Application name reported to the notification center.
const APP_NAME: &str = "tocsin";

/// A displayer that hands notifications to the operating system notification
/// center.
#[derive(Debug, Default)]
pub struct DesktopDisplayer;

impl DesktopDisplayer {
    /// Creates a new `DesktopDisplayer`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl NotificationDisplayer for DesktopDisplayer {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), DisplayError> {
        // The badge has no desktop counterpart; the icon carries the artwork.
        let mut notification = notify_rust::Notification::new();
        notification
            .appname(APP_NAME)
            .summary(title)
            .body(&options.body)
            .icon(options.icon.as_str());
        let notification = notification.finalize();

        // Showing blocks on the notification bus, so it runs off the async
        // runtime.
        task::spawn_blocking(move || notification.show().map(|_| ()))
            .await
            .map_err(|e| DisplayError::DisplayFailed(format!("Display task panicked: {e}")))??;

        Ok(())
    }
}
