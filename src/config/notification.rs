use serde::Deserialize;
use url::Url;

/// Fallback text used when an alert payload is absent or leaves a field out.
const DEFAULT_TITLE: &str = "Market Alert";

/// Fallback body used when an alert payload is absent or leaves the body out.
const DEFAULT_BODY: &str = "New Signal Detected!";

const DEFAULT_ICON_URL: &str = "https://cdn-icons-png.flaticon.com/512/2464/2464402.png";

/// Configuration for how push alerts are rendered into notifications.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct NotificationConfig {
    /// Title shown when a push message carries no title of its own.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Body shown when a push message carries no body of its own.
    #[serde(default = "default_body")]
    pub default_body: String,

    /// Icon attached to every notification.
    #[serde(default = "default_icon_url")]
    pub icon_url: Url,

    /// Badge attached to every notification.
    #[serde(default = "default_badge_url")]
    pub badge_url: Url,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            default_body: default_body(),
            icon_url: default_icon_url(),
            badge_url: default_badge_url(),
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_body() -> String {
    DEFAULT_BODY.to_string()
}

fn default_icon_url() -> Url {
    Url::parse(DEFAULT_ICON_URL).expect("default icon URL is valid")
}

/// The badge shares the icon artwork unless overridden.
fn default_badge_url() -> Url {
    Url::parse(DEFAULT_ICON_URL).expect("default badge URL is valid")
}
