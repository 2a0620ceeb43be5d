//! Data models for push delivery.

use std::future::Future;

use tokio_util::task::TaskTracker;

/// A push message as submitted to the delivery channel. Carries the raw
/// payload bytes, if the sender attached any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushMessage {
    payload: Option<Vec<u8>>,
}

impl PushMessage {
    /// Creates a message with no payload.
    pub fn empty() -> Self {
        Self { payload: None }
    }

    /// Creates a message carrying the given payload bytes.
    pub fn with_payload(payload: Vec<u8>) -> Self {
        Self {
            payload: Some(payload),
        }
    }

    /// Consumes the message and returns its payload.
    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }
}

/// A push message paired with the lifetime grant the worker issued for it.
///
/// The handler receiving the event owns it outright. Whatever asynchronous
/// work the handler starts must be registered through [`EventLifetime`] or
/// the worker is free to shut down before that work settles.
#[derive(Debug)]
pub struct PushEvent {
    data: Option<Vec<u8>>,
    lifetime: EventLifetime,
}

impl PushEvent {
    /// Creates a new event around raw payload bytes and a lifetime grant.
    pub fn new(data: Option<Vec<u8>>, lifetime: EventLifetime) -> Self {
        Self { data, lifetime }
    }

    /// The raw payload bytes, if the message carried any.
    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Consumes the event, returning the payload and the lifetime grant.
    pub fn into_parts(self) -> (Option<Vec<u8>>, EventLifetime) {
        (self.data, self.lifetime)
    }
}

/// A single-use grant that keeps the worker alive until a future settles.
///
/// Extending consumes the grant, so each event can extend its lifetime at
/// most once and the registration cannot outlive the event that issued it.
#[derive(Debug)]
pub struct EventLifetime {
    tracker: TaskTracker,
}

impl EventLifetime {
    /// Creates a lifetime grant backed by the worker's task tracker.
    pub fn new(tracker: TaskTracker) -> Self {
        Self { tracker }
    }

    /// Registers `settling` as work the worker must wait out before it shuts
    /// down. The future runs to completion even if its outcome is an error;
    /// whoever built it is responsible for recording failures.
    pub fn extend_until<F>(self, settling: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tracker.spawn(settling);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    };

    use super::*;

    #[test]
    fn test_push_message_payload_round_trip() {
        assert_eq!(PushMessage::empty().into_payload(), None);

        let message = PushMessage::with_payload(b"{}".to_vec());
        assert_eq!(message.into_payload(), Some(b"{}".to_vec()));
    }

    #[tokio::test]
    async fn test_extend_until_registers_work_with_the_tracker() {
        let tracker = TaskTracker::new();
        let lifetime = EventLifetime::new(tracker.clone());
        assert_eq!(tracker.len(), 0);

        lifetime.extend_until(async {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        });

        assert_eq!(tracker.len(), 1);
    }

    #[tokio::test]
    async fn test_tracker_wait_outlasts_extended_work() {
        let tracker = TaskTracker::new();
        let settled = Arc::new(AtomicBool::new(false));

        let lifetime = EventLifetime::new(tracker.clone());
        let flag = Arc::clone(&settled);
        lifetime.extend_until(async move {
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            flag.store(true, Ordering::SeqCst);
        });

        tracker.close();
        tracker.wait().await;
        assert!(settled.load(Ordering::SeqCst));
    }
}
