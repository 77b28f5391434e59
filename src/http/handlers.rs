//! Request handlers and routing for the `/tasks` resource.

use super::ApiError;
use crate::task::{
    domain::Task,
    ports::TaskRepository,
    services::{CreateTaskRequest, TaskLifecycleService},
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
};
use mockable::Clock;
use serde::Deserialize;
use tracing::warn;

/// JSON body accepted by `POST /tasks`.
///
/// Any other field a client sends (`id`, `status`, ...) is ignored; those
/// values are always assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    pub title: String,
    /// Optional task description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let request = Self::new(body.title);
        match body.description {
            Some(description) => request.with_description(description),
            None => request,
        }
    }
}

/// Builds the task API router around a shared service context.
pub fn router<R, C>(service: TaskLifecycleService<R, C>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks",
            get(list_tasks::<R, C>)
                .post(create_task::<R, C>)
                // `get` would otherwise answer HEAD as well.
                .head(method_not_allowed)
                .fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn create_task<R, C>(
    State(service): State<TaskLifecycleService<R, C>>,
    body: Bytes,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    // The body is decoded by hand so every malformed payload maps to 400,
    // whatever its content type.
    let submission = serde_json::from_slice::<CreateTaskBody>(&body).map_err(|err| {
        warn!(error = %err, "malformed task submission");
        ApiError::InvalidInput
    })?;

    let task = service
        .create_task(submission.into())
        .await
        .map_err(|err| ApiError::from_create(&err))?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn list_tasks<R, C>(
    State(service): State<TaskLifecycleService<R, C>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service
        .list_tasks()
        .await
        .map_err(|err| ApiError::from_list(&err))?;
    Ok(Json(tasks))
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
