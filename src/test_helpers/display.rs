//! A displayer that records what it is asked to show, for tests.

use std::{sync::Mutex, time::Duration};

use crate::{
    display::{DisplayError, NotificationDisplayer},
    models::NotificationOptions,
};

/// A `NotificationDisplayer` that records every show call.
#[derive(Debug, Default)]
pub struct RecordingDisplayer {
    shown: Mutex<Vec<(String, NotificationOptions)>>,
    delay: Option<Duration>,
    fail_with: Option<String>,
}

impl RecordingDisplayer {
    /// Creates a displayer that records and settles immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every show call take at least `delay` before settling.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Makes every show call settle with a display failure.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// The notifications shown so far, in display order.
    pub fn shown(&self) -> Vec<(String, NotificationOptions)> {
        self.shown.lock().expect("recording lock poisoned").clone()
    }
}

#[async_trait::async_trait]
impl NotificationDisplayer for RecordingDisplayer {
    async fn show(&self, title: &str, options: &NotificationOptions) -> Result<(), DisplayError> {
        eprintln!("DBG displayer: show called for {title}");
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(message) = &self.fail_with {
            return Err(DisplayError::DisplayFailed(message.clone()));
        }
        self.shown
            .lock()
            .expect("recording lock poisoned")
            .push((title.to_string(), options.clone()));
        Ok(())
    }
}
