//! Folio - Main Entry Point
//!
//! Loads configuration, assembles the application and runs the console
//! until `quit` or end of input.

use folio_app::{AppConfig, ApplicationFactory, MainCoordinator, console};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout carries only the rendered screens
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        api_url = %config.api_url,
        "Starting Folio v{}",
        env!("CARGO_PKG_VERSION")
    );

    let factory = ApplicationFactory::new(&config)?;
    let (render_tx, render_rx) = mpsc::unbounded_channel();
    let coordinator = MainCoordinator::new(factory, render_tx);

    console::run(
        coordinator,
        render_rx,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await?;

    Ok(())
}
