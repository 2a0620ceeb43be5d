//! Implements the `dry-run` subcommand: a one-shot evaluation of the
//! watchlist that prints the readings and previews the notifications the
//! monitor would emit, without starting the supervisor.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tokio_util::task::TaskTracker;

use crate::{
    config::AppConfig,
    context::AppMetrics,
    display::{NotificationDisplayer, StdoutDisplayer},
    engine::SignalEngine,
    models::{EventLifetime, PushEvent, SignalReading, TrendDirection, VixReading},
    monitor::alert_content,
    providers::{http::HttpMarketDataSource, traits::MarketDataSource},
    push::PushNotificationPresenter,
};

/// Arguments for the `dry-run` subcommand.
#[derive(Parser, Debug)]
pub struct DryRunArgs {
    /// Evaluate a single symbol instead of the configured watchlist.
    #[arg(short, long)]
    symbol: Option<String>,
}

/// The trend direction observed on one configured timeframe.
#[derive(Debug, Serialize)]
struct TrendEntry {
    timeframe: String,
    direction: TrendDirection,
}

/// One evaluated symbol: the intraday reading plus the broader timeframes.
#[derive(Debug, Serialize)]
struct DryRunEntry {
    reading: SignalReading,
    trends: Vec<TrendEntry>,
}

/// The full report printed by the `dry-run` subcommand.
#[derive(Debug, Serialize)]
struct DryRunReport {
    generated_at: DateTime<Utc>,
    vix: Option<VixReading>,
    entries: Vec<DryRunEntry>,
}

/// Evaluates the watchlist once and prints the report as pretty JSON,
/// followed by a preview of each notification rendered to stdout.
pub async fn execute(args: DryRunArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialization
    let config = AppConfig::new(None)?;
    let engine = SignalEngine::new(config.signal.clone())?;
    let data_source = HttpMarketDataSource::new(config.market_data_url.clone());

    // 2. Symbol Selection
    let symbols = match args.symbol {
        Some(symbol) => vec![symbol],
        None => config.market.watchlist.clone(),
    };

    // 3. Volatility Context
    let vix = match data_source.latest_quote(&config.market.vix_symbol).await {
        Ok(level) => Some(VixReading {
            level,
            status: engine.vix_status(level),
        }),
        Err(e) => {
            tracing::debug!(symbol = %config.market.vix_symbol, error = %e, "VIX quote unavailable.");
            None
        }
    };

    // 4. Core Loop
    let mut entries = Vec::new();
    for symbol in &symbols {
        let chart_symbol = config.market.resolve_symbol(symbol);
        let candles = data_source
            .fetch_candles(
                chart_symbol,
                &config.market.candle_interval,
                &config.market.candle_range,
            )
            .await?;
        let reading = engine.evaluate(symbol, &candles)?;

        let mut trends = Vec::new();
        for profile in &config.market.trend_profiles {
            let direction = match data_source
                .fetch_candles(chart_symbol, &profile.interval, &profile.range)
                .await
            {
                Ok(candles) => engine.trend(&candles),
                Err(e) => {
                    tracing::debug!(
                        symbol = %symbol,
                        timeframe = %profile.label,
                        error = %e,
                        "Trend fetch failed, reporting the timeframe as neutral."
                    );
                    TrendDirection::Neutral
                }
            };
            trends.push(TrendEntry {
                timeframe: profile.label.clone(),
                direction,
            });
        }

        entries.push(DryRunEntry { reading, trends });
    }

    // 5. Reporting
    let report = DryRunReport {
        generated_at: Utc::now(),
        vix,
        entries,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    // 6. Notification Preview
    // A dry run always renders to stdout, whatever backend the config
    // selects, so it never fires desktop popups or webhooks.
    let displayer: Arc<dyn NotificationDisplayer> = Arc::new(StdoutDisplayer::new());
    let presenter = PushNotificationPresenter::new(
        displayer,
        config.notification.clone(),
        AppMetrics::default(),
    );
    let tracker = TaskTracker::new();
    for entry in &report.entries {
        let data = alert_content(&entry.reading, report.vix.as_ref());
        let payload = serde_json::to_vec(&data)?;
        let event = PushEvent::new(Some(payload), EventLifetime::new(tracker.clone()));
        presenter.on_push(event)?;
    }
    tracker.close();
    tracker.wait().await;

    Ok(())
}
