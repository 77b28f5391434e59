//! Service configuration.
//!
//! Values come from command-line flags with environment-variable fallbacks
//! and defaults matching a local single-node deployment.

use crate::task::{queue::DEFAULT_QUEUE_CAPACITY, services::DEFAULT_PROCESSING_DELAY};
use clap::Parser;
use std::net::SocketAddr;
use std::time::Duration;

/// Runtime settings for the task service.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "tasktrack", version, about = "Minimal asynchronous task-tracking service")]
pub struct ServiceConfig {
    /// Address the HTTP listener binds to.
    #[arg(long = "bind", env = "TASKTRACK_BIND", default_value = "0.0.0.0:8081")]
    pub bind_addr: SocketAddr,

    /// `SQLite` database path, or `:memory:`.
    #[arg(long, env = "TASKTRACK_DATABASE_URL", default_value = "tasks.db")]
    pub database_url: String,

    /// Maximum number of connections in the storage pool.
    #[arg(long, env = "TASKTRACK_POOL_SIZE", default_value_t = 4)]
    pub pool_size: u32,

    /// Tasks buffered between ingestion and the worker before submissions wait.
    #[arg(long, env = "TASKTRACK_QUEUE_CAPACITY", default_value_t = DEFAULT_QUEUE_CAPACITY)]
    pub queue_capacity: usize,

    /// Simulated processing time per task, in seconds.
    #[arg(
        long,
        env = "TASKTRACK_PROCESSING_DELAY_SECS",
        default_value_t = DEFAULT_PROCESSING_DELAY.as_secs()
    )]
    pub processing_delay_secs: u64,

    /// Time in-flight requests get to finish after a shutdown signal, in seconds.
    #[arg(long, env = "TASKTRACK_SHUTDOWN_GRACE_SECS", default_value_t = 5)]
    pub shutdown_grace_secs: u64,

    /// Log filter used when `RUST_LOG` is unset.
    #[arg(long, env = "TASKTRACK_LOG", default_value = "info")]
    pub log_filter: String,
}

impl ServiceConfig {
    /// Returns the simulated per-task processing delay.
    #[must_use]
    pub const fn processing_delay(&self) -> Duration {
        Duration::from_secs(self.processing_delay_secs)
    }

    /// Returns the listener grace period applied on shutdown.
    #[must_use]
    pub const fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8081)),
            database_url: "tasks.db".to_owned(),
            pool_size: 4,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            processing_delay_secs: DEFAULT_PROCESSING_DELAY.as_secs(),
            shutdown_grace_secs: 5,
            log_filter: "info".to_owned(),
        }
    }
}
