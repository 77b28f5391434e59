//! Bounded queue behaviour when submissions outpace the worker.

use std::time::Duration;

use crate::in_memory::helpers::{Pipeline, all_completed};
use rstest::rstest;
use tasktrack::task::{domain::TaskStatus, services::CreateTaskRequest};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn submission_waits_while_queue_is_full() {
    let mut pipeline = Pipeline::new(2);
    for title in ["one", "two"] {
        pipeline
            .service
            .create_task(CreateTaskRequest::new(title))
            .await
            .expect("room in the queue");
    }
    assert_eq!(pipeline.service.queue().len(), 2);

    let service = pipeline.service.clone();
    let blocked = tokio::spawn(async move {
        service
            .create_task(CreateTaskRequest::new("three"))
            .await
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!blocked.is_finished(), "third submission should wait for room");

    // The waiting task is already durable even though it is not queued.
    let listed = pipeline.service.list_tasks().await.expect("list");
    assert_eq!(listed.len(), 3);

    let worker = pipeline.start_worker();
    let third = blocked
        .await
        .expect("join")
        .expect("submission completes once the worker frees a slot");
    assert_eq!(third.title(), "three");

    let tasks = pipeline.wait_until(all_completed).await;
    assert!(tasks.iter().all(|task| task.status() == TaskStatus::Completed));

    pipeline.service.queue().close();
    let summary = worker.join().await.expect("worker joins");
    assert_eq!(summary.completed, 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn no_submission_is_dropped_under_load() {
    let mut pipeline = Pipeline::new(3);
    let worker = pipeline.start_worker();

    let mut submissions = Vec::new();
    for index in 0..12 {
        let service = pipeline.service.clone();
        submissions.push(tokio::spawn(async move {
            service
                .create_task(CreateTaskRequest::new(format!("load {index}")))
                .await
        }));
    }
    for submission in submissions {
        submission.await.expect("join").expect("accepted");
    }

    pipeline.service.queue().close();
    let summary = worker.join().await.expect("worker joins");
    assert_eq!(summary.completed, 12);
    assert_eq!(summary.failed, 0);
    assert!(all_completed(&pipeline.service.list_tasks().await.expect("list")));
}
