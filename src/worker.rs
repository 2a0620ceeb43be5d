//! The push delivery worker.
//!
//! [`PushWorker`] owns the receiving end of the push channel and delivers
//! each message to the notification presenter, one at a time, the way a host
//! platform fires push events at a registered handler. It also owns the task
//! tracker behind every [`EventLifetime`] it issues, so its shutdown waits
//! for extended event work to settle before the worker goes away.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{
    context::AppMetrics,
    models::{EventLifetime, PushEvent, PushMessage},
    push::PushNotificationPresenter,
};

/// Delivers push messages to the notification presenter.
pub struct PushWorker {
    presenter: PushNotificationPresenter,
    push_rx: mpsc::Receiver<PushMessage>,
    tracker: TaskTracker,
    metrics: AppMetrics,
    cancellation_token: CancellationToken,
    shutdown_timeout: Duration,
}

impl PushWorker {
    /// Creates a new `PushWorker`.
    pub fn new(
        presenter: PushNotificationPresenter,
        push_rx: mpsc::Receiver<PushMessage>,
        metrics: AppMetrics,
        cancellation_token: CancellationToken,
        shutdown_timeout: Duration,
    ) -> Self {
        Self {
            presenter,
            push_rx,
            tracker: TaskTracker::new(),
            metrics,
            cancellation_token,
            shutdown_timeout,
        }
    }

    /// Starts the long-running delivery loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    tracing::info!("PushWorker cancellation signal received, shutting down...");
                    break;
                }

                maybe_message = self.push_rx.recv() => {
                    match maybe_message {
                        Some(message) => self.deliver(message).await,
                        None => {
                            tracing::info!("Push channel closed, shutting down...");
                            break;
                        }
                    }
                }
            }
        }

        self.drain().await;
        tracing::info!("PushWorker has shut down.");
    }

    /// Delivers one message to the handler as a push event.
    async fn deliver(&self, message: PushMessage) {
        eprintln!("DBG worker: message received");
        self.metrics.record_event_received().await;

        let event = PushEvent::new(
            message.into_payload(),
            EventLifetime::new(self.tracker.clone()),
        );

        if let Err(e) = self.presenter.on_push(event) {
            self.metrics.record_handler_failure().await;
            tracing::error!(
                error = %e,
                "Push handler failed, nothing will be displayed for this event."
            );
        }
    }

    /// Waits out extended event lifetimes, bounded by the shutdown timeout.
    async fn drain(&self) {
        self.tracker.close();
        let pending = self.tracker.len();
        if pending > 0 {
            tracing::info!(pending, "Waiting for in-flight notifications to settle...");
        }

        if tokio::time::timeout(self.shutdown_timeout, self.tracker.wait())
            .await
            .is_err()
        {
            tracing::warn!(
                timeout_secs = self.shutdown_timeout.as_secs(),
                "In-flight notifications did not settle before the shutdown timeout."
            );
        }
    }
}
