//! HTTP surface for the task lifecycle pipeline.
//!
//! A single `/tasks` resource: `POST` submits a task, `GET` lists every
//! task newest first, and any other method is answered with `405`.

mod error;
mod handlers;

pub use error::ApiError;
pub use handlers::{CreateTaskBody, router};
