//! Runs the task-tracking HTTP service.
//!
//! Usage:
//!
//! ```text
//! tasktrack [--bind 0.0.0.0:8081] [--database-url tasks.db]
//! ```
//!
//! Every flag also reads a `TASKTRACK_*` environment variable; run with
//! `--help` for the full list. SIGINT or SIGTERM triggers a graceful
//! shutdown that drains the task queue before exiting.

use clap::Parser;
use std::process::ExitCode;
use tasktrack::config::ServiceConfig;
use tasktrack::server::{TaskServer, shutdown_signal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let config = ServiceConfig::parse();
    init_tracing(&config.log_filter);

    let server = match TaskServer::start(&config).await {
        Ok(server) => server,
        Err(err) => {
            error!(error = %err, "startup failed");
            return ExitCode::FAILURE;
        }
    };

    match server.run(shutdown_signal()).await {
        Ok(_) => {
            info!("goodbye");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "task service failed");
            ExitCode::FAILURE
        }
    }
}

/// Initialises the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
