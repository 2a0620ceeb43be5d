use std::sync::Arc;

use clap::{Parser, Subcommand};
use tocsin::{
    cmd::{DryRunArgs, dry_run},
    config::AppConfig,
    context::AppMetrics,
    display::build_displayer,
    providers::http::HttpMarketDataSource,
    supervisor::Supervisor,
};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs the main monitoring supervisor.
    Run,
    /// Evaluates the watchlist once and prints the readings without starting
    /// the supervisor.
    DryRun(DryRunArgs),
}

#[tokio::main]
#[tracing::instrument(level = "info")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    let subscriber =
        FmtSubscriber::builder().with_env_filter(EnvFilter::from_default_env()).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => run_supervisor().await?,
        Commands::DryRun(args) => dry_run::execute(args).await?,
    }

    Ok(())
}

async fn run_supervisor() -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!("Loading application configuration...");
    let config = AppConfig::new(None)?; // TODO: get config path from env
    tracing::debug!(
        market_data_url = %config.market_data_url,
        watchlist = ?config.market.watchlist,
        "Configuration loaded."
    );

    let app_metrics = AppMetrics::default();

    tracing::debug!("Initializing market data source...");
    let data_source = Arc::new(HttpMarketDataSource::new(config.market_data_url.clone()));

    tracing::debug!(backend = ?config.display.backend, "Initializing notification displayer...");
    let displayer = build_displayer(&config)?;

    let supervisor = Supervisor::builder()
        .config(config)
        .app_metrics(app_metrics)
        .data_source(data_source)
        .displayer(displayer)
        .build()?;

    tracing::info!("Supervisor initialized, starting monitoring...");

    supervisor.run().await?;

    Ok(())
}
