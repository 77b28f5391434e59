//! Domain model for the task lifecycle pipeline.
//!
//! A task is submitted as a [`NewTask`], receives its [`TaskId`] from the
//! durable store and then moves exactly once from
//! [`TaskStatus::Pending`] to [`TaskStatus::Completed`]. Infrastructure
//! concerns stay outside of this boundary.

mod error;
mod ids;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::TaskId;
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
