//! Service lifecycle: startup wiring and coordinated shutdown.
//!
//! Startup opens storage, ensures the schema, builds the queue, launches the
//! completion worker and binds the listener. Shutdown runs in a fixed order:
//! stop accepting requests (with a grace period for in-flight ones), close
//! the queue, wait for the worker to drain it, then close storage.

use crate::config::ServiceConfig;
use crate::http;
use crate::task::{
    adapters::sqlite::SqliteTaskRepository,
    ports::{TaskRepository, TaskRepositoryError},
    queue::{TaskQueue, TaskQueueError},
    services::{CompletionWorker, TaskLifecycleService, WorkerHandle, WorkerSummary},
};
use mockable::DefaultClock;
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Fatal errors raised while starting the service.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The store could not be opened or its schema created.
    #[error("storage initialization failed: {0}")]
    Storage(#[from] TaskRepositoryError),
    /// The task queue could not be built.
    #[error("queue initialization failed: {0}")]
    Queue(#[from] TaskQueueError),
    /// The HTTP listener could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Address the listener tried to bind.
        addr: SocketAddr,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised while serving or shutting down.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The HTTP listener failed.
    #[error("http server failed: {0}")]
    Http(#[source] io::Error),
    /// The completion worker panicked before draining the queue.
    #[error("completion worker failed: {0}")]
    Worker(#[source] tokio::task::JoinError),
}

/// A started task service, ready to serve requests.
pub struct TaskServer {
    listener: TcpListener,
    local_addr: SocketAddr,
    repository: Arc<SqliteTaskRepository>,
    service: TaskLifecycleService<SqliteTaskRepository, DefaultClock>,
    worker: WorkerHandle,
    shutdown_grace: Duration,
}

impl TaskServer {
    /// Opens storage, launches the worker and binds the listener.
    ///
    /// # Errors
    ///
    /// Returns [`StartupError`] when storage cannot be opened or
    /// initialized, the queue configuration is invalid, or the address cannot
    /// be bound. None of these are recoverable.
    pub async fn start(config: &ServiceConfig) -> Result<Self, StartupError> {
        info!(database_url = %config.database_url, "opening task store");
        let repository = Arc::new(SqliteTaskRepository::connect(
            &config.database_url,
            config.pool_size,
        )?);
        repository.create_schema().await?;

        let (queue, receiver) = TaskQueue::bounded(config.queue_capacity)?;
        let worker = CompletionWorker::new(Arc::clone(&repository), config.processing_delay())
            .spawn(receiver);
        let service =
            TaskLifecycleService::new(Arc::clone(&repository), Arc::new(DefaultClock), queue);

        let listener = TcpListener::bind(config.bind_addr)
            .await
            .map_err(|source| StartupError::Bind {
                addr: config.bind_addr,
                source,
            })?;
        let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;

        Ok(Self {
            listener,
            local_addr,
            repository,
            service,
            worker,
            shutdown_grace: config.shutdown_grace(),
        })
    }

    /// Returns the address the listener is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serves requests until `shutdown` resolves, then shuts down in order.
    ///
    /// The grace period bounds only the listener. Draining the queue is not
    /// bounded: each remaining task still takes the full processing delay.
    ///
    /// # Errors
    ///
    /// Returns [`ServeError`] when the listener fails or the worker panics.
    /// Storage is closed in every case.
    pub async fn run<F>(self, shutdown: F) -> Result<WorkerSummary, ServeError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            local_addr,
            repository,
            service,
            worker,
            shutdown_grace,
        } = self;
        let queue = service.queue().clone();
        let stop_accepting = CancellationToken::new();

        info!(addr = %local_addr, "task service listening");
        let app = http::router(service);
        let serve = axum::serve(listener, app)
            .with_graceful_shutdown(stop_accepting.clone().cancelled_owned());
        let mut server = tokio::spawn(async move { serve.await });

        let early_exit = tokio::select! {
            result = &mut server => Some(result),
            () = shutdown => None,
        };

        let http_result = match early_exit {
            Some(finished) => {
                error!("http server stopped unexpectedly");
                finished
            }
            None => {
                info!(grace = ?shutdown_grace, "shutdown requested, draining in-flight requests");
                stop_accepting.cancel();
                match tokio::time::timeout(shutdown_grace, &mut server).await {
                    Ok(finished) => finished,
                    Err(_) => {
                        warn!("grace period elapsed, aborting remaining requests");
                        server.abort();
                        if let Err(err) = server.await
                            && !err.is_cancelled()
                        {
                            warn!(error = %err, "http server task failed while aborting");
                        }
                        Ok(Ok(()))
                    }
                }
            }
        };

        let queued = queue.len();
        queue.close();
        info!(queued, "task queue closed, waiting for worker to drain");
        let worker_result = worker.join().await;

        drop(repository);
        info!("task store closed");

        let summary = worker_result.map_err(ServeError::Worker)?;
        match http_result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => return Err(ServeError::Http(err)),
            Err(join_err) if join_err.is_cancelled() => {}
            Err(join_err) => return Err(ServeError::Http(io::Error::other(join_err))),
        }
        info!(
            completed = summary.completed,
            failed = summary.failed,
            "task service stopped"
        );
        Ok(summary)
    }
}

/// Resolves when the process receives SIGINT or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
        info!("received SIGINT");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("received SIGTERM");
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }
}
