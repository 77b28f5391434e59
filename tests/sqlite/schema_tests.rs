//! Schema creation tests for the `SQLite` task repository.

use crate::sqlite::helpers::{TempDatabase, block_on, repository, submission, temp_database};
use rstest::rstest;
use tasktrack::task::{
    adapters::sqlite::SqliteTaskRepository,
    domain::{TaskId, TaskStatus},
    ports::TaskRepository,
};

#[rstest]
fn create_schema_twice_is_a_no_op(repository: SqliteTaskRepository) {
    let listed = block_on(async {
        repository.insert(&submission("survivor")).await.expect("insert");
        repository
            .create_schema()
            .await
            .expect("second schema creation succeeds");
        repository.list_all().await.expect("list")
    });

    assert_eq!(listed.len(), 1);
}

#[rstest]
fn tasks_survive_reopening_the_database(temp_database: TempDatabase) {
    let first_id = block_on(async {
        let repository =
            SqliteTaskRepository::connect(&temp_database.url(), 2).expect("open database");
        repository.create_schema().await.expect("create schema");
        let id = repository.insert(&submission("durable")).await.expect("insert");
        repository
            .update_status(id, TaskStatus::Completed)
            .await
            .expect("update");
        id
    });

    let (listed, next_id) = block_on(async {
        let repository =
            SqliteTaskRepository::connect(&temp_database.url(), 2).expect("reopen database");
        repository.create_schema().await.expect("schema already exists");
        let next_id = repository.insert(&submission("later")).await.expect("insert");
        (repository.list_all().await.expect("list"), next_id)
    });

    assert_eq!(first_id, TaskId::new(1));
    assert_eq!(next_id, TaskId::new(2));
    let durable = listed
        .iter()
        .find(|task| task.id() == first_id)
        .expect("task from the first session");
    assert_eq!(durable.status(), TaskStatus::Completed);
}

#[rstest]
fn connect_fails_for_unreachable_path() {
    let result = SqliteTaskRepository::connect("/nonexistent-dir/tasktrack/tasks.db", 1);
    assert!(result.is_err());
}
