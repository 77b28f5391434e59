//! Task lifecycle pipeline.
//!
//! Clients submit tasks, tasks persist to durable storage as `pending`, and
//! a single background worker later marks them `completed`. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The ingestion-to-worker hand-off in [`queue`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod queue;
pub mod services;
