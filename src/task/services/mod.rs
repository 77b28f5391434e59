//! Application services for the task lifecycle pipeline.

mod lifecycle;
mod worker;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
pub use worker::{CompletionWorker, DEFAULT_PROCESSING_DELAY, WorkerHandle, WorkerSummary};
