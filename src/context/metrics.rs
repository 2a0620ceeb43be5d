use std::sync::Arc;

use tokio::sync::RwLock;

/// A struct to hold application metrics.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// The time the application started.
    pub start_time: tokio::time::Instant,
    /// Push events the worker has received.
    pub events_received: u64,
    /// Push events whose payload could not be handled.
    pub handler_failures: u64,
    /// Notifications successfully displayed.
    pub notifications_displayed: u64,
    /// Notification display attempts that failed.
    pub display_failures: u64,
    /// Alerts submitted by the market monitor.
    pub alerts_emitted: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            start_time: tokio::time::Instant::now(),
            events_received: 0,
            handler_failures: 0,
            notifications_displayed: 0,
            display_failures: 0,
            alerts_emitted: 0,
        }
    }
}

/// Shared application metrics.
#[derive(Clone, Default)]
pub struct AppMetrics {
    /// Shared metrics.
    pub metrics: Arc<RwLock<Metrics>>,
}

impl AppMetrics {
    /// Records a push event arriving at the worker.
    pub async fn record_event_received(&self) {
        self.metrics.write().await.events_received += 1;
    }

    /// Records a push event the handler rejected.
    pub async fn record_handler_failure(&self) {
        self.metrics.write().await.handler_failures += 1;
    }

    /// Records a notification that was displayed.
    pub async fn record_notification_displayed(&self) {
        self.metrics.write().await.notifications_displayed += 1;
    }

    /// Records a display attempt that failed.
    pub async fn record_display_failure(&self) {
        self.metrics.write().await.display_failures += 1;
    }

    /// Records an alert submitted by the monitor.
    pub async fn record_alert_emitted(&self) {
        self.metrics.write().await.alerts_emitted += 1;
    }

    /// Returns a copy of the current metrics.
    pub async fn snapshot(&self) -> Metrics {
        self.metrics.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_metrics_recording() {
        let metrics = AppMetrics::default();

        metrics.record_event_received().await;
        metrics.record_event_received().await;
        metrics.record_handler_failure().await;
        metrics.record_notification_displayed().await;
        metrics.record_display_failure().await;
        metrics.record_alert_emitted().await;

        let snapshot = metrics.snapshot().await;
        assert_eq!(snapshot.events_received, 2);
        assert_eq!(snapshot.handler_failures, 1);
        assert_eq!(snapshot.notifications_displayed, 1);
        assert_eq!(snapshot.display_failures, 1);
        assert_eq!(snapshot.alerts_emitted, 1);
    }
}
