//! Then steps for task pipeline BDD scenarios.

use std::time::Duration;

use super::world::{TaskPipelineWorld, get_tasks, run_async, send};
use rstest_bdd_macros::then;
use serde_json::Value;

fn listed_tasks(world: &TaskPipelineWorld) -> Result<Vec<Value>, eyre::Report> {
    let reply = run_async(send(world.app.clone(), get_tasks()));
    eyre::ensure!(reply.status.as_u16() == 200, "listing failed with {}", reply.status);
    Ok(serde_json::from_slice(&reply.body)?)
}

#[then(r"the response status is {status:u16}")]
fn response_status(world: &TaskPipelineWorld, status: u16) -> Result<(), eyre::Report> {
    let reply = world
        .last_reply
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no request has been sent"))?;
    eyre::ensure!(
        reply.status.as_u16() == status,
        "expected status {status}, got {} ({})",
        reply.status,
        String::from_utf8_lossy(&reply.body)
    );
    Ok(())
}

#[then(r#"the returned task has id {id:i64} and status "{status}""#)]
fn returned_task(world: &TaskPipelineWorld, id: i64, status: String) -> Result<(), eyre::Report> {
    let reply = world
        .last_reply
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no request has been sent"))?;
    let task: Value = serde_json::from_slice(&reply.body)?;
    eyre::ensure!(
        task.get("id").and_then(Value::as_i64) == Some(id),
        "unexpected id in {task}"
    );
    eyre::ensure!(
        task.get("status").and_then(Value::as_str) == Some(status.as_str()),
        "unexpected status in {task}"
    );
    Ok(())
}

#[then(r#"listing tasks shows {count:usize} task with status "{status}""#)]
fn listing_shows(
    world: &TaskPipelineWorld,
    count: usize,
    status: String,
) -> Result<(), eyre::Report> {
    let tasks = listed_tasks(world)?;
    eyre::ensure!(tasks.len() == count, "expected {count} tasks, listed {}", tasks.len());
    eyre::ensure!(
        tasks
            .iter()
            .all(|task| task.get("status").and_then(Value::as_str) == Some(status.as_str())),
        "not every task is {status}: {tasks:?}"
    );
    Ok(())
}

#[then("listing tasks shows no tasks")]
fn listing_is_empty(world: &TaskPipelineWorld) -> Result<(), eyre::Report> {
    let tasks = listed_tasks(world)?;
    eyre::ensure!(tasks.is_empty(), "expected no tasks, listed {tasks:?}");
    Ok(())
}

#[then("the background submission is still waiting")]
fn background_waiting(world: &TaskPipelineWorld) -> Result<(), eyre::Report> {
    run_async(tokio::time::sleep(Duration::from_millis(150)));
    let submission = world
        .background_submission
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no background submission"))?;
    eyre::ensure!(
        !submission.is_finished(),
        "submission finished while the queue was full"
    );
    Ok(())
}

#[then(r"the background submission succeeds with status {status:u16}")]
fn background_succeeds(world: &mut TaskPipelineWorld, status: u16) -> Result<(), eyre::Report> {
    let submission = world
        .background_submission
        .take()
        .ok_or_else(|| eyre::eyre!("no background submission"))?;
    let reply = run_async(tokio::time::timeout(Duration::from_secs(5), submission))??;
    eyre::ensure!(
        reply.status.as_u16() == status,
        "expected status {status}, got {}",
        reply.status
    );
    world.last_reply = Some(reply);
    Ok(())
}
