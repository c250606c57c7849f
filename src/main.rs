//! graceful-shutdown demo daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!   register(action, level) ──▶ start on own task ──▶ ready within start timeout?
//!                                                        │ no: exit(1)
//!                                                        ▼ yes
//!                                              ┌────────────────────┐
//!                                              │ registry           │
//!                                              │  HIGH: [http, ..]  │
//!                                              │  MID:  [..]        │
//!                                              │  LOW:  [..]        │
//!                                              └─────────┬──────────┘
//!   SIGINT / SIGTERM / SIGHUP ──▶ run() ──▶ stop HIGH → MID → LOW under one deadline
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use graceful_shutdown::config::{load_config, LogFormat, OrchestratorConfig};
use graceful_shutdown::lifecycle::{GracefulShutdown, Level};
use graceful_shutdown::observability::logging::init_logging;
use graceful_shutdown::HttpServer;

#[derive(Parser)]
#[command(name = "graceful-shutdown")]
#[command(about = "Runs actions until SIGINT, SIGTERM or SIGHUP, then stops them in priority order", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured log format.
    #[arg(long, value_parser = parse_log_format)]
    log_format: Option<LogFormat>,
}

fn parse_log_format(value: &str) -> Result<LogFormat, String> {
    match value {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format {other:?}, expected pretty or json")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OrchestratorConfig::default(),
    };
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    init_logging(&config.logging)?;

    tracing::info!("graceful-shutdown v0.1.0 starting");
    tracing::info!(
        start_timeout_ms = config.lifecycle.start_timeout_ms,
        shutdown_timeout_ms = config.lifecycle.shutdown_timeout_ms,
        on_start_failure = ?config.lifecycle.on_start_failure,
        "Configuration loaded"
    );

    let mut orchestrator = GracefulShutdown::from_config(&config.lifecycle);

    if config.http.enabled {
        orchestrator
            .register(Arc::new(HttpServer::new(config.http.clone())), Level::High)
            .await?;
    }

    if let Err(e) = orchestrator.run().await {
        tracing::error!(error = %e, "Shutdown did not complete");
        std::process::exit(1);
    }

    Ok(())
}
