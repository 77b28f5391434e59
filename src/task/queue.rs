//! Bounded hand-off channel between task ingestion and the completion worker.
//!
//! The queue is the only synchronization point between request handlers and
//! the worker. Producers wait while the queue is full instead of dropping
//! tasks, and the consumer observes closure only after every buffered task
//! has been delivered.

use crate::task::domain::Task;
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;
use tokio::sync::mpsc;

/// Default number of tasks buffered between ingestion and the worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Errors returned by [`TaskQueue`] operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TaskQueueError {
    /// The queue was closed before the task could be enqueued.
    #[error("task queue is closed")]
    Closed,

    /// A queue cannot be created without room for at least one task.
    #[error("task queue capacity must be at least 1")]
    ZeroCapacity,
}

/// Producer side of the task queue.
///
/// Cloning is cheap; every clone feeds the same consumer and observes the
/// same closure.
#[derive(Debug, Clone)]
pub struct TaskQueue {
    sender: Arc<Mutex<Option<mpsc::Sender<Task>>>>,
    capacity: usize,
}

/// Consumer side of the task queue, owned by the completion worker.
#[derive(Debug)]
pub struct TaskQueueReceiver {
    receiver: mpsc::Receiver<Task>,
}

impl TaskQueue {
    /// Creates a FIFO queue holding at most `capacity` tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::ZeroCapacity`] when `capacity` is zero.
    pub fn bounded(capacity: usize) -> Result<(Self, TaskQueueReceiver), TaskQueueError> {
        if capacity == 0 {
            return Err(TaskQueueError::ZeroCapacity);
        }
        let (sender, receiver) = mpsc::channel(capacity);
        let queue = Self {
            sender: Arc::new(Mutex::new(Some(sender))),
            capacity,
        };
        Ok((queue, TaskQueueReceiver { receiver }))
    }

    /// Hands a task to the worker, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns [`TaskQueueError::Closed`] once [`TaskQueue::close`] has been
    /// called or the worker has gone away.
    pub async fn enqueue(&self, task: Task) -> Result<(), TaskQueueError> {
        let sender = self.sender().ok_or(TaskQueueError::Closed)?;
        sender.send(task).await.map_err(|_| TaskQueueError::Closed)
    }

    /// Stops accepting new tasks.
    ///
    /// Tasks already buffered, and sends already waiting for room, are still
    /// delivered to the worker. Closing twice is harmless.
    pub fn close(&self) {
        self.slot().take();
    }

    /// Returns whether [`TaskQueue::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.slot().is_none()
    }

    /// Returns the maximum number of buffered tasks.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of tasks currently buffered.
    ///
    /// Reports zero once the queue is closed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sender()
            .map_or(0, |sender| sender.max_capacity() - sender.capacity())
    }

    /// Returns whether no tasks are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sender(&self) -> Option<mpsc::Sender<Task>> {
        self.slot().clone()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<mpsc::Sender<Task>>> {
        self.sender.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl TaskQueueReceiver {
    /// Waits for the next task in FIFO order.
    ///
    /// Returns `None` once the queue is closed and every buffered task has
    /// been delivered.
    pub async fn dequeue(&mut self) -> Option<Task> {
        self.receiver.recv().await
    }
}
