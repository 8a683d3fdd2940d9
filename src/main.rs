//! Alert Relay - posts platform alert events to a chat webhook.
//!
//! Reads newline-delimited JSON events from a file or stdin and relays each
//! one as a chat message.

use alert_relay::{app::App, cli::Cli, config::Config};
use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{self, AsyncBufRead, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration by layering sources: defaults, file, environment, and CLI args.
    let config = Config::load(&cli).unwrap_or_else(|err| {
        tracing_subscriber::fmt().init();
        error!("Failed to load configuration: {}", err);
        std::process::exit(1);
    });

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = config.validate() {
        error!("{}", err);
        std::process::exit(1);
    }

    info!("Alert relay starting up...");
    info!(
        "Event source: {}",
        cli.events
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "stdin".to_string())
    );

    let reader: Box<dyn AsyncBufRead + Unpin + Send> = match &cli.events {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open event file {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };

    let app = App::from_config(&config);
    tokio::select! {
        result = app.run(reader) => {
            let summary = result?;
            info!(
                "Relayed {} events ({} rejected). Exiting.",
                summary.dispatched, summary.rejected
            );
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Shutdown signal received. Abandoning in-flight deliveries.");
        }
    }

    Ok(())
}
