//! Tasktrack: a minimal asynchronous task-tracking service.
//!
//! Clients submit tasks over HTTP, tasks persist to `SQLite`, and a single
//! background worker marks them complete after a simulated processing delay.
//!
//! # Architecture
//!
//! Tasktrack follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, in-memory)
//!
//! # Modules
//!
//! - [`task`]: Task domain, storage, queue, ingestion service and worker
//! - [`http`]: The `/tasks` HTTP resource
//! - [`server`]: Startup wiring and coordinated shutdown
//! - [`config`]: Command-line and environment configuration

pub mod config;
pub mod http;
pub mod server;
pub mod task;
