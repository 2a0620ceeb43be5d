//! This module provides the `SupervisorBuilder` for constructing a `Supervisor`.

use std::sync::Arc;

use crate::{
    config::AppConfig, context::AppMetrics, display::NotificationDisplayer,
    engine::SignalEngine, providers::traits::MarketDataSource,
};

use super::{Supervisor, SupervisorError};

/// A builder for creating a `Supervisor` instance.
#[derive(Default)]
pub struct SupervisorBuilder {
    config: Option<AppConfig>,
    app_metrics: Option<AppMetrics>,
    data_source: Option<Arc<dyn MarketDataSource>>,
    displayer: Option<Arc<dyn NotificationDisplayer>>,
}

impl SupervisorBuilder {
    /// Creates a new, empty `SupervisorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the application configuration for the `Supervisor`.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the shared application metrics for the `Supervisor`.
    pub fn app_metrics(mut self, app_metrics: AppMetrics) -> Self {
        self.app_metrics = Some(app_metrics);
        self
    }

    /// Sets the market data source (e.g., the chart API client) for the
    /// `Supervisor`.
    pub fn data_source(mut self, data_source: Arc<dyn MarketDataSource>) -> Self {
        self.data_source = Some(data_source);
        self
    }

    /// Sets the notification displayer for the `Supervisor`.
    pub fn displayer(mut self, displayer: Arc<dyn NotificationDisplayer>) -> Self {
        self.displayer = Some(displayer);
        self
    }

    /// Assembles and validates the components to build a `Supervisor`.
    ///
    /// This method performs the final "wiring" of the application's services.
    /// It ensures all required dependencies have been provided and then
    /// constructs the internal services, such as the `SignalEngine`.
    pub fn build(self) -> Result<Supervisor, SupervisorError> {
        let config = self.config.ok_or(SupervisorError::MissingConfig)?;
        let app_metrics = self.app_metrics.ok_or(SupervisorError::MissingAppMetrics)?;
        let data_source = self.data_source.ok_or(SupervisorError::MissingDataSource)?;
        let displayer = self.displayer.ok_or(SupervisorError::MissingDisplayer)?;

        // The SignalEngine validates its periods here, so a misconfigured
        // watch never makes it to the first scan.
        let engine = SignalEngine::new(config.signal.clone())?;

        // Finally, construct the Supervisor with all its components.
        Ok(Supervisor::new(
            config,
            app_metrics,
            data_source,
            displayer,
            engine,
        ))
    }
}
