//! Completion worker draining the task queue.

use crate::task::{
    domain::Task,
    ports::TaskRepository,
    queue::TaskQueueReceiver,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// Default simulated processing time per task.
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_secs(5);

/// Totals reported by a worker once its queue has been drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerSummary {
    /// Tasks whose completed status was persisted.
    pub completed: usize,
    /// Tasks left pending because the status update failed.
    pub failed: usize,
}

/// Single sequential consumer of the task queue.
///
/// Each task is held for the processing delay and then marked completed in
/// the store. Tasks are completed in the order they were enqueued. A failed
/// status update is logged and the task stays pending; it is never retried.
pub struct CompletionWorker<R>
where
    R: TaskRepository,
{
    repository: Arc<R>,
    processing_delay: Duration,
}

/// Handle to a spawned [`CompletionWorker`].
#[derive(Debug)]
pub struct WorkerHandle {
    join: JoinHandle<WorkerSummary>,
}

impl<R> CompletionWorker<R>
where
    R: TaskRepository + 'static,
{
    /// Creates a worker writing to `repository`.
    #[must_use]
    pub const fn new(repository: Arc<R>, processing_delay: Duration) -> Self {
        Self {
            repository,
            processing_delay,
        }
    }

    /// Runs the worker as a background task.
    #[must_use]
    pub fn spawn(self, receiver: TaskQueueReceiver) -> WorkerHandle {
        let join = tokio::spawn(async move { self.run(receiver).await });
        WorkerHandle { join }
    }

    /// Processes tasks until the queue is closed and drained.
    pub async fn run(&self, mut receiver: TaskQueueReceiver) -> WorkerSummary {
        let mut summary = WorkerSummary::default();
        while let Some(task) = receiver.dequeue().await {
            if self.process(task).await {
                summary.completed += 1;
            } else {
                summary.failed += 1;
            }
        }
        info!(
            completed = summary.completed,
            failed = summary.failed,
            "task queue drained, worker stopping"
        );
        summary
    }

    async fn process(&self, mut task: Task) -> bool {
        let task_id = task.id();
        info!(task_id = %task_id, title = task.title(), "processing task");

        tokio::time::sleep(self.processing_delay).await;

        if let Err(err) = task.complete() {
            error!(task_id = %task_id, error = %err, "task cannot be completed");
            return false;
        }
        match self.repository.update_status(task_id, task.status()).await {
            Ok(()) => {
                info!(task_id = %task_id, title = task.title(), "task completed");
                true
            }
            Err(err) => {
                error!(task_id = %task_id, error = %err, "failed to persist task completion");
                false
            }
        }
    }
}

impl WorkerHandle {
    /// Waits for the worker to drain the queue and stop.
    ///
    /// The worker only stops after the queue has been closed.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] when the worker task panicked or was
    /// aborted.
    pub async fn join(self) -> Result<WorkerSummary, JoinError> {
        self.join.await
    }

    /// Returns whether the worker loop has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}
