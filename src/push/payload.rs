use crate::{
    config::NotificationConfig,
    models::{NotificationData, PushPayload},
    push::PushError,
};

/// Derives the notification content for a push event.
///
/// An absent payload yields the configured defaults. A payload that parses
/// keeps whichever fields it carries and falls back per field, so the result
/// always has both a title and a body. A payload that does not parse as the
/// expected JSON object is an error and produces no content at all.
pub fn derive_notification_data(
    raw: Option<&[u8]>,
    defaults: &NotificationConfig,
) -> Result<NotificationData, PushError> {
    let payload = match raw {
        Some(bytes) => serde_json::from_slice::<PushPayload>(bytes)?,
        None => PushPayload::default(),
    };

    Ok(NotificationData {
        title: payload
            .title
            .unwrap_or_else(|| defaults.default_title.clone()),
        body: payload.body.unwrap_or_else(|| defaults.default_body.clone()),
    })
}
