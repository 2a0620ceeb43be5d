//! The Supervisor module manages the lifecycle of the Tocsin application.
//!
//! This module implements the **Supervisor Pattern**, a design pattern used to
//! manage the lifecycle of multiple, concurrent, long-running services. It acts
//! as the top-level owner of all major components of the application, such as
//! the market monitor and the push worker.
//!
//! ## Responsibilities
//!
//! - **Initialization**: The `SupervisorBuilder` constructs and "wires" all
//!   services together, injecting necessary dependencies like configuration and
//!   the market data source.
//! - **Lifecycle Management**: The `Supervisor` starts all services and manages
//!   their lifetimes.
//! - **Graceful Shutdown**: It listens for shutdown signals (like Ctrl+C or
//!   SIGTERM) and orchestrates a clean shutdown of all managed services.
//! - **Task Supervision**: It monitors the health of each service. If a
//!   critical service fails (panics or returns an error), the supervisor will
//!   shut down all other services to ensure the application exits cleanly
//!   rather than continuing in a partially-functional state.

mod builder;

use std::sync::Arc;

use builder::SupervisorBuilder;
use thiserror::Error;
use tokio::{signal, sync::mpsc};

use crate::{
    config::AppConfig,
    context::AppMetrics,
    display::NotificationDisplayer,
    engine::{EngineError, SignalEngine},
    models::PushMessage,
    monitor::MarketMonitor,
    providers::traits::MarketDataSource,
    push::PushNotificationPresenter,
    worker::PushWorker,
};

/// Represents the set of errors that can occur during the supervisor's
/// operation.
#[derive(Debug, Error)]
pub enum SupervisorError {
    /// A required configuration was not provided to the `SupervisorBuilder`.
    #[error("Missing configuration for Supervisor")]
    MissingConfig,

    /// An app metrics was not provided to the `SupervisorBuilder`.
    #[error("Missing app metrics for Supervisor")]
    MissingAppMetrics,

    /// A market data source was not provided to the `SupervisorBuilder`.
    #[error("Missing market data source for Supervisor")]
    MissingDataSource,

    /// A notification displayer was not provided to the `SupervisorBuilder`.
    #[error("Missing notification displayer for Supervisor")]
    MissingDisplayer,

    /// The signal engine rejected the provided configuration.
    #[error("Signal engine error: {0}")]
    Engine(#[from] EngineError),
}

/// The primary runtime manager for the application.
///
/// The Supervisor owns all the major components (services) and is responsible
/// for their startup, shutdown, and health monitoring. Once `run` is called, it
/// becomes the main process loop for the entire application.
pub struct Supervisor {
    /// Shared application configuration.
    config: Arc<AppConfig>,

    /// The shared application metrics.
    app_metrics: AppMetrics,

    /// The source of candle and quote data for the monitored symbols.
    data_source: Arc<dyn MarketDataSource>,

    /// The sink that renders notifications for the user.
    displayer: Arc<dyn NotificationDisplayer>,

    /// The engine that turns candle series into trading signals.
    engine: Arc<SignalEngine>,

    /// A token used to signal a graceful shutdown to all supervised tasks.
    cancellation_token: tokio_util::sync::CancellationToken,

    /// A set of all spawned tasks that the supervisor is actively managing.
    join_set: tokio::task::JoinSet<()>,
}

impl Supervisor {
    /// Creates a new Supervisor instance with all its required components.
    ///
    /// This is typically called by the `SupervisorBuilder` after it has
    /// assembled all the necessary dependencies.
    pub fn new(
        config: AppConfig,
        app_metrics: AppMetrics,
        data_source: Arc<dyn MarketDataSource>,
        displayer: Arc<dyn NotificationDisplayer>,
        engine: SignalEngine,
    ) -> Self {
        Self {
            config: Arc::new(config),
            app_metrics,
            data_source,
            displayer,
            engine: Arc::new(engine),
            cancellation_token: tokio_util::sync::CancellationToken::new(),
            join_set: tokio::task::JoinSet::new(),
        }
    }

    /// Starts the supervisor and all its managed services.
    ///
    /// This method is the main entry point for the application's runtime. It
    /// performs the following steps:
    /// 1. Spawns a signal handler to listen for `SIGINT` (Ctrl+C) and
    ///    `SIGTERM`.
    /// 2. Spawns the `MarketMonitor` and the `PushWorker` as long-running
    ///    background tasks, connected by the push channel.
    /// 3. Enters the main `select!` loop, which concurrently:
    ///    - Listens for the shutdown signal.
    ///    - Monitors the health of all spawned tasks via the `JoinSet`.
    /// 4. Upon shutdown, it waits for all tasks to complete so that every
    ///    in-flight notification settles before the process exits.
    pub async fn run(mut self) -> Result<(), SupervisorError> {
        // Clone the token for the signal handler task.
        let cancellation_token = self.cancellation_token.clone();

        // Spawn a task to listen for shutdown signals.
        self.join_set.spawn(async move {
            let ctrl_c = signal::ctrl_c();
            #[cfg(unix)]
            let terminate = async {
                signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("Failed to register SIGTERM handler")
                    .recv()
                    .await;
            };
            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => tracing::info!("SIGINT (Ctrl+C) received, initiating graceful shutdown."),
                _ = terminate => tracing::info!("SIGTERM received, initiating graceful shutdown."),
                // A shutdown that started elsewhere releases this task too.
                _ = cancellation_token.cancelled() => return,
            }

            // Notify all other tasks to begin shutting down.
            cancellation_token.cancel();
        });

        // --- Service Initialization ---

        // Create the channel that connects the MarketMonitor to the PushWorker.
        let (push_tx, push_rx) =
            mpsc::channel::<PushMessage>(self.config.push_channel_capacity as usize);

        // --- Task Spawning ---

        // Spawn the MarketMonitor service.
        let market_monitor = MarketMonitor::new(
            Arc::clone(&self.config),
            Arc::clone(&self.engine),
            Arc::clone(&self.data_source),
            push_tx,
            self.app_metrics.clone(),
            self.cancellation_token.clone(),
        );
        self.join_set.spawn(async move {
            market_monitor.run().await;
        });

        // Spawn the PushWorker service.
        let presenter = PushNotificationPresenter::new(
            Arc::clone(&self.displayer),
            self.config.notification.clone(),
            self.app_metrics.clone(),
        );
        let push_worker = PushWorker::new(
            presenter,
            push_rx,
            self.app_metrics.clone(),
            self.cancellation_token.clone(),
            self.config.shutdown_timeout,
        );
        self.join_set.spawn(async move {
            push_worker.run().await;
        });

        // --- Main Supervisor Loop ---
        // This loop is only responsible for monitoring task health and
        // shutdown signals.

        loop {
            tokio::select! {
                maybe_result = self.join_set.join_next() => {
                    match maybe_result {
                        Some(Ok(_)) => {
                            eprintln!("DBG supervisor: a task completed OK");
                            // Task completed successfully, continue monitoring.
                        }
                        Some(Err(e)) => {
                            eprintln!("DBG supervisor: task FAILED: {e:?}");
                            tracing::error!("A critical task failed: {:?}. Initiating shutdown.", e);
                            self.cancellation_token.cancel();
                        }
                        None => {
                            // All tasks have completed.
                            break;
                        }
                    }
                }
                _ = self.cancellation_token.cancelled() => {
                    // Cancellation requested externally, break the loop.
                    break;
                }
            }
        }

        // --- Graceful Shutdown ---

        // Cancellation may have been requested by a failing task rather than a
        // signal, so make sure every remaining task sees it.
        self.cancellation_token.cancel();

        // Every service reacts to the token, so the drain normally finishes on
        // its own. The timeout only guards against a notification backend that
        // never settles.
        let shutdown_timeout = self.config.shutdown_timeout;
        let drain = async {
            while let Some(result) = self.join_set.join_next().await {
                if let Err(e) = result {
                    tracing::error!("A supervised task failed during shutdown: {:?}", e);
                }
            }
        };

        if tokio::time::timeout(shutdown_timeout, drain).await.is_err() {
            tracing::warn!(
                "Supervised tasks did not stop within {:?}. Aborting the remainder.",
                shutdown_timeout
            );
            self.join_set.shutdown().await;
        }
        tracing::info!("All supervised tasks have completed.");

        let counters = self.app_metrics.snapshot().await;
        tracing::info!(
            uptime = ?counters.start_time.elapsed(),
            events_received = counters.events_received,
            handler_failures = counters.handler_failures,
            notifications_displayed = counters.notifications_displayed,
            display_failures = counters.display_failures,
            alerts_emitted = counters.alerts_emitted,
            "Final counters recorded."
        );

        tracing::info!("Supervisor shutdown complete.");
        Ok(())
    }

    /// Returns a new `SupervisorBuilder` instance.
    ///
    /// This is the public entry point for creating a supervisor.
    pub fn builder() -> SupervisorBuilder {
        SupervisorBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        models::{Candle, NotificationData},
        test_helpers::{candle_series, FixedMarketData, RecordingDisplayer},
    };

    fn rising_candles() -> Vec<Candle> {
        let closes: Vec<f64> = (1..=30).map(f64::from).collect();
        candle_series(&closes)
    }

    #[tokio::test(start_paused = true)]
    async fn run_delivers_an_alert_and_stops_on_cancellation() {
        let config = AppConfig::builder()
            .watchlist(&["NQ=F"])
            .refresh_interval(Duration::from_secs(60))
            .build();
        let data_source =
            Arc::new(FixedMarketData::new().with_candles("NQ=F", rising_candles()));
        let displayer = Arc::new(RecordingDisplayer::new());
        let metrics = AppMetrics::default();

        let supervisor = Supervisor::builder()
            .config(config)
            .app_metrics(metrics.clone())
            .data_source(data_source)
            .displayer(Arc::clone(&displayer) as Arc<dyn NotificationDisplayer>)
            .build()
            .unwrap();
        let cancellation_token = supervisor.cancellation_token.clone();

        let handle = tokio::spawn(supervisor.run());

        // One refresh interval passes, the scan fires, and the alert reaches
        // the displayer through the worker.
        while displayer.shown().is_empty() {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }

        cancellation_token.cancel();
        handle.await.unwrap().unwrap();

        let shown = displayer.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0, "NQ=F Alert");
        assert!(shown[0].1.body.starts_with("STRONG LONG"));

        let counters = metrics.snapshot().await;
        assert_eq!(counters.alerts_emitted, 1);
        assert_eq!(counters.events_received, 1);
        assert_eq!(counters.notifications_displayed, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn run_waits_for_inflight_notifications_before_exiting() {
        let config = AppConfig::builder()
            .watchlist(&["ES=F"])
            .refresh_interval(Duration::from_secs(60))
            .build();
        let data_source =
            Arc::new(FixedMarketData::new().with_candles("ES=F", rising_candles()));
        let displayer =
            Arc::new(RecordingDisplayer::new().with_delay(Duration::from_secs(5)));

        let supervisor = Supervisor::builder()
            .config(config)
            .app_metrics(AppMetrics::default())
            .data_source(data_source)
            .displayer(Arc::clone(&displayer) as Arc<dyn NotificationDisplayer>)
            .build()
            .unwrap();
        let cancellation_token = supervisor.cancellation_token.clone();

        let handle = tokio::spawn(supervisor.run());

        // Let the scan fire, then cancel while the displayer is still
        // sleeping inside `show`.
        tokio::time::sleep(Duration::from_secs(61)).await;
        cancellation_token.cancel();
        handle.await.unwrap().unwrap();

        assert_eq!(displayer.shown().len(), 1, "shutdown must not drop the in-flight display");
    }

    #[tokio::test(start_paused = true)]
    async fn run_shuts_down_cleanly_when_scans_find_no_data() {
        let config = AppConfig::builder()
            .watchlist(&["NQ=F"])
            .refresh_interval(Duration::from_secs(60))
            .shutdown_timeout(Duration::from_secs(5))
            .push_channel_capacity(1)
            .build();
        // No candles at all: every scan logs a fetch failure and moves on,
        // so the services idle until cancellation.
        let data_source = Arc::new(FixedMarketData::new());
        let displayer = Arc::new(RecordingDisplayer::new());

        let supervisor = Supervisor::builder()
            .config(config)
            .app_metrics(AppMetrics::default())
            .data_source(data_source)
            .displayer(displayer as Arc<dyn NotificationDisplayer>)
            .build()
            .unwrap();
        let cancellation_token = supervisor.cancellation_token.clone();

        let handle = tokio::spawn(supervisor.run());
        tokio::time::sleep(Duration::from_secs(90)).await;
        cancellation_token.cancel();

        handle.await.unwrap().unwrap();
    }

    #[test]
    fn alert_payload_shape_matches_presenter_expectations() {
        let data = NotificationData {
            title: "NQ=F Alert".to_string(),
            body: "STRONG LONG at 18100.00".to_string(),
        };
        let bytes = serde_json::to_vec(&data).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed["title"], "NQ=F Alert");
        assert_eq!(parsed["body"], "STRONG LONG at 18100.00");
    }
}
