//! Client-facing errors for the task HTTP API.

use crate::task::services::TaskLifecycleError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients as a status code and a short plain-text
/// message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request body could not be turned into a task submission.
    #[error("invalid input")]
    InvalidInput,
    /// The task could not be persisted.
    #[error("save failed")]
    SaveFailed,
    /// Tasks could not be read from the store.
    #[error("list failed")]
    ListFailed,
    /// The service stopped accepting work while the request was in flight.
    #[error("service shutting down")]
    ShuttingDown,
    /// The resource does not support the request method.
    #[error("method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::SaveFailed | Self::ListFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ShuttingDown => StatusCode::SERVICE_UNAVAILABLE,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Maps a failed task submission.
    #[must_use]
    pub fn from_create(err: &TaskLifecycleError) -> Self {
        match err {
            TaskLifecycleError::Domain(domain) => {
                warn!(error = %domain, "rejected task submission");
                Self::InvalidInput
            }
            TaskLifecycleError::Repository(repository) => {
                error!(error = %repository, "failed to save task");
                Self::SaveFailed
            }
            TaskLifecycleError::Queue(queue) => {
                warn!(error = %queue, "task saved but not queued");
                Self::ShuttingDown
            }
        }
    }

    /// Maps a failed task listing.
    #[must_use]
    pub fn from_list(err: &TaskLifecycleError) -> Self {
        error!(error = %err, "failed to list tasks");
        Self::ListFailed
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
