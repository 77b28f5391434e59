//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers start at 1 and are never reused, mirroring the durable store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    last_id: i64,
    tasks: BTreeMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create_schema(&self) -> TaskRepositoryResult<()> {
        Ok(())
    }

    async fn insert(&self, task: &NewTask) -> TaskRepositoryResult<TaskId> {
        let mut state = self.state.write().map_err(poisoned)?;
        state.last_id += 1;
        let id = TaskId::new(state.last_id);
        state.tasks.insert(id, task.clone().into_task(id));
        Ok(id)
    }

    async fn update_status(&self, id: TaskId, status: TaskStatus) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(());
        };
        *task = Task::from_persisted(PersistedTaskData {
            id,
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
            status,
            created_at: task.created_at(),
        });
        Ok(())
    }

    async fn list_all(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut tasks: Vec<Task> = state.tasks.values().cloned().collect();
        tasks.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(tasks)
    }
}
