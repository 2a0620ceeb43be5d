//! Error types for the push handler.

use thiserror::Error;

/// Defines the possible errors that can occur while handling a push event.
#[derive(Debug, Error)]
pub enum PushError {
    /// The event carried a payload that could not be parsed as notification
    /// JSON.
    #[error("Malformed push payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}
