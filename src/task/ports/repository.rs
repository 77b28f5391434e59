//! Repository port for durable task storage.

use crate::task::domain::{NewTask, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Durable task storage contract.
///
/// Implementations are shared by every request handler and the completion
/// worker, so they must be safe for concurrent use without external locking.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Ensures the task table exists.
    ///
    /// Calling this against an initialized store is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the store is
    /// unreachable or corrupt.
    async fn create_schema(&self) -> TaskRepositoryResult<()>;

    /// Persists a new pending task and returns its store-assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId>;

    /// Updates the status of an existing task.
    ///
    /// Updating an identifier that does not exist is a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<()>;

    /// Returns every task ordered by creation time, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the read fails.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
