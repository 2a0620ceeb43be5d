//! Data models for notifications.

use serde::{Deserialize, Serialize};
use url::Url;

/// The JSON shape a push message payload is parsed as. Both fields are
/// optional on the wire.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
pub struct PushPayload {
    /// Title carried by the payload, if any.
    pub title: Option<String>,
    /// Body carried by the payload, if any.
    pub body: Option<String>,
}

/// The text content of a notification, with every fallback already applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NotificationData {
    /// The title of the notification.
    pub title: String,
    /// The body content of the notification.
    pub body: String,
}

/// Presentation options attached to a notification alongside its title.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotificationOptions {
    /// The body content of the notification.
    pub body: String,
    /// Icon shown with the notification.
    pub icon: Url,
    /// Badge shown when there is no room for the full notification.
    pub badge: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_payload_parses_partial_json() {
        let payload: PushPayload = serde_json::from_str(r#"{"title": "NQ=F Alert"}"#).unwrap();
        assert_eq!(payload.title.as_deref(), Some("NQ=F Alert"));
        assert_eq!(payload.body, None);
    }

    #[test]
    fn test_push_payload_ignores_unknown_fields() {
        let payload: PushPayload =
            serde_json::from_str(r#"{"title": "t", "body": "b", "tag": "x"}"#).unwrap();
        assert_eq!(payload.title.as_deref(), Some("t"));
        assert_eq!(payload.body.as_deref(), Some("b"));
    }

    #[test]
    fn test_notification_options_serialize_shape() {
        let options = NotificationOptions {
            body: "New Signal Detected!".to_string(),
            icon: Url::parse("https://example.com/icon.png").unwrap(),
            badge: Url::parse("https://example.com/badge.png").unwrap(),
        };
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["body"], "New Signal Detected!");
        assert_eq!(json["icon"], "https://example.com/icon.png");
        assert_eq!(json["badge"], "https://example.com/badge.png");
    }
}
