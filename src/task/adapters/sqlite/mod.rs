//! `SQLite` adapters for durable task storage.

mod models;
mod repository;
mod schema;

pub use repository::{CREATE_TASKS_SQL, SqliteTaskRepository, TaskSqlitePool};
