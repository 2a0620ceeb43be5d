//! Error types for the notification display service.

use thiserror::Error;

/// Defines the possible errors that can occur while displaying a notification.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// An error related to invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error from the underlying `reqwest` library.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// An error from the operating system notification center.
    #[error("Desktop notification error: {0}")]
    DesktopError(#[from] notify_rust::error::Error),

    /// An error indicating that the notification failed to be displayed.
    #[error("Display failed: {0}")]
    DisplayFailed(String),
}
