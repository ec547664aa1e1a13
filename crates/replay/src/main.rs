//! Replay entry point.

use replay::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> replay::Result<()> {
    // 1. Load configuration
    let config = Config::from_env()?;

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(?config, "starting replay");

    // 3. Replay until caught up or interrupted
    tokio::select! {
        report = replay::run(&config) => {
            let report = report?;
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "failed to serialize report"),
            }
            tracing::info!(steps = report.steps, "replay finished");
        }
        _ = signal::ctrl_c() => {
            tracing::info!("received SIGINT, stopping replay");
        }
    }

    Ok(())
}
