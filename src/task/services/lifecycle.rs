//! Service layer for task ingestion and listing.

use crate::task::{
    domain::{NewTask, Task, TaskDomainError},
    ports::{TaskRepository, TaskRepositoryError},
    queue::{TaskQueue, TaskQueueError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for submitting a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// The task was persisted but could not be handed to the worker.
    #[error(transparent)]
    Queue(#[from] TaskQueueError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Service context shared by every request handler.
///
/// Constructed once at startup and passed to the HTTP layer; it owns the
/// store handle and the producer side of the task queue.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
    queue: TaskQueue,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            queue: self.queue.clone(),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, queue: TaskQueue) -> Self {
        Self {
            repository,
            clock,
            queue,
        }
    }

    /// Returns the producer side of the task queue.
    #[must_use]
    pub const fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    /// Validates, persists and enqueues a new task.
    ///
    /// The task is written to the store before it is enqueued, so it is
    /// visible through [`TaskLifecycleService::list_tasks`] as soon as this
    /// call returns. Enqueueing waits while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is empty,
    /// [`TaskLifecycleError::Repository`] when persistence fails (nothing is
    /// enqueued), or [`TaskLifecycleError::Queue`] when the queue has been
    /// closed for shutdown.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let new_task = NewTask::new(request.title, request.description, &*self.clock)?;
        let id = self.repository.insert(&new_task).await?;
        let task = new_task.into_task(id);
        info!(task_id = %id, title = task.title(), "task persisted");

        self.queue.enqueue(task.clone()).await?;
        Ok(task)
    }

    /// Returns every task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the read fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.repository.list_all().await?)
    }
}
