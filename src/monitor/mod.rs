//! The market monitor scans the watchlist on an interval and turns signal
//! changes into push alerts.
//!
//! A change is judged per symbol against the last submitted signal, so a
//! symbol holding the same stance across many scans alerts once, not once
//! per scan.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{
    config::AppConfig,
    context::AppMetrics,
    engine::SignalEngine,
    models::{NotificationData, PushMessage, Signal, SignalReading, VixReading},
    providers::{MarketDataError, MarketDataSource},
};

/// Builds the notification content announcing a signal reading.
pub fn alert_content(reading: &SignalReading, vix: Option<&VixReading>) -> NotificationData {
    let title = format!("{} Alert", reading.symbol);
    let mut body = format!("{} at {:.2}", reading.signal, reading.price);
    if let Some(vix) = vix {
        body.push_str(&format!(" | VIX {:.2} ({})", vix.level, vix.status));
    }
    NotificationData { title, body }
}

/// Scans the watchlist and submits an alert whenever a symbol's signal
/// changes.
pub struct MarketMonitor<D: MarketDataSource + ?Sized> {
    config: Arc<AppConfig>,
    engine: Arc<SignalEngine>,
    data_source: Arc<D>,
    push_tx: mpsc::Sender<PushMessage>,
    metrics: AppMetrics,
    cancellation_token: CancellationToken,
    last_signals: HashMap<String, Signal>,
}

impl<D: MarketDataSource + ?Sized> MarketMonitor<D> {
    /// Creates a new `MarketMonitor`.
    pub fn new(
        config: Arc<AppConfig>,
        engine: Arc<SignalEngine>,
        data_source: Arc<D>,
        push_tx: mpsc::Sender<PushMessage>,
        metrics: AppMetrics,
        cancellation_token: CancellationToken,
    ) -> Self {
        Self {
            config,
            engine,
            data_source,
            push_tx,
            metrics,
            cancellation_token,
            last_signals: HashMap::new(),
        }
    }

    /// Starts the long-running scan loop.
    pub async fn run(mut self) {
        loop {
            let refresh_delay = tokio::time::sleep(self.config.refresh_interval_secs);

            tokio::select! {
                biased;

                _ = self.cancellation_token.cancelled() => {
                    tracing::info!("MarketMonitor cancellation signal received, shutting down...");
                    break;
                }

                _ = refresh_delay => {
                    match self.scan_markets().await {
                        Ok(()) => {}
                        Err(MarketDataError::ChannelClosed) => {
                            tracing::warn!("Push channel closed, stopping market scans.");
                            break;
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Error during market scan cycle. Retrying after delay...");
                        }
                    }
                }
            }
        }
        tracing::info!("MarketMonitor has shut down.");
    }

    /// Performs one scan over the watchlist.
    async fn scan_markets(&mut self) -> Result<(), MarketDataError> {
        let vix = self.read_vix().await;

        let watchlist = self.config.market.watchlist.clone();
        for symbol in watchlist {
            if self.cancellation_token.is_cancelled() {
                tracing::info!("Cancellation requested, stopping market scan.");
                break;
            }

            let resolved = self.config.market.resolve_symbol(&symbol).to_string();
            let candles = match self
                .data_source
                .fetch_candles(
                    &resolved,
                    &self.config.market.candle_interval,
                    &self.config.market.candle_range,
                )
                .await
            {
                Ok(candles) => candles,
                Err(e) => {
                    tracing::warn!(error = %e, symbol = %symbol, "Failed to fetch candles, skipping symbol.");
                    continue;
                }
            };

            // Readings keep the watchlist symbol even when a shadow symbol
            // supplied the candles.
            let reading = match self.engine.evaluate(&symbol, &candles) {
                Ok(reading) => reading,
                Err(e) => {
                    tracing::debug!(error = %e, symbol = %symbol, "Series not evaluable, skipping symbol.");
                    continue;
                }
            };

            if self.last_signals.get(&symbol) == Some(&reading.signal) {
                tracing::debug!(symbol = %symbol, signal = %reading.signal, "Signal unchanged.");
                continue;
            }
            self.last_signals.insert(symbol.clone(), reading.signal);

            self.submit_alert(&reading, vix.as_ref()).await?;
        }

        Ok(())
    }

    /// Encodes and submits one alert.
    async fn submit_alert(
        &self,
        reading: &SignalReading,
        vix: Option<&VixReading>,
    ) -> Result<(), MarketDataError> {
        let content = alert_content(reading, vix);
        let payload = match serde_json::to_vec(&content) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(error = %e, symbol = %reading.symbol, "Failed to encode alert payload.");
                return Ok(());
            }
        };

        if self
            .push_tx
            .send(PushMessage::with_payload(payload))
            .await
            .is_err()
        {
            tracing::warn!("Push channel closed, dropping alert.");
            return Err(MarketDataError::ChannelClosed);
        }

        self.metrics.record_alert_emitted().await;
        eprintln!("DBG monitor: alert submitted for {}", reading.symbol);
        tracing::info!(
            symbol = %reading.symbol,
            signal = %reading.signal,
            price = reading.price,
            "Signal change detected, alert submitted."
        );
        Ok(())
    }

    /// Reads the volatility index, if it is reachable this cycle.
    async fn read_vix(&self) -> Option<VixReading> {
        match self
            .data_source
            .latest_quote(&self.config.market.vix_symbol)
            .await
        {
            Ok(level) => Some(VixReading {
                level,
                status: self.engine.vix_status(level),
            }),
            Err(e) => {
                tracing::debug!(error = %e, "Volatility index unavailable this cycle.");
                None
            }
        }
    }
}
