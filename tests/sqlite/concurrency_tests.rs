//! Concurrent use of one `SQLite` repository by many callers.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::sqlite::helpers::{TempDatabase, block_on, submission, temp_database};
use rstest::rstest;
use tasktrack::task::{
    adapters::sqlite::SqliteTaskRepository,
    domain::TaskStatus,
    ports::TaskRepository,
};

#[rstest]
fn concurrent_inserts_receive_distinct_ids(temp_database: TempDatabase) {
    let repository = Arc::new(
        SqliteTaskRepository::connect(&temp_database.url(), 4).expect("open database"),
    );

    let (ids, listed) = block_on(async {
        repository.create_schema().await.expect("create schema");
        let mut handles = Vec::new();
        for index in 0..20 {
            let repository = Arc::clone(&repository);
            handles.push(tokio::spawn(async move {
                repository
                    .insert(&submission(&format!("task {index}")))
                    .await
            }));
        }

        let mut ids = BTreeSet::new();
        for handle in handles {
            let id = handle.await.expect("join").expect("insert");
            ids.insert(id);
        }
        (ids, repository.list_all().await.expect("list"))
    });

    assert_eq!(ids.len(), 20);
    assert_eq!(listed.len(), 20);
}

#[rstest]
fn updates_interleave_with_reads(temp_database: TempDatabase) {
    let repository = Arc::new(
        SqliteTaskRepository::connect(&temp_database.url(), 4).expect("open database"),
    );

    let listed = block_on(async {
        repository.create_schema().await.expect("create schema");
        let mut ids = Vec::new();
        for index in 0..10 {
            ids.push(
                repository
                    .insert(&submission(&format!("task {index}")))
                    .await
                    .expect("insert"),
            );
        }

        let writer = {
            let repository = Arc::clone(&repository);
            tokio::spawn(async move {
                for id in ids {
                    repository
                        .update_status(id, TaskStatus::Completed)
                        .await
                        .expect("update");
                }
            })
        };
        for _ in 0..10 {
            repository.list_all().await.expect("concurrent list");
        }
        writer.await.expect("writer joins");
        repository.list_all().await.expect("list")
    });

    assert!(
        listed
            .iter()
            .all(|task| task.status() == TaskStatus::Completed)
    );
}
