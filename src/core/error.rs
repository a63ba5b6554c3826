//! Error types for scheduler operations.

use thiserror::Error;

/// Errors produced by scheduler lifecycle and submission operations.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// `start` was called while the worker is already running.
    #[error("scheduler already started")]
    AlreadyStarted,
    /// `stop` was called before the scheduler was started.
    #[error("scheduler is not running")]
    NotRunning,
    /// The operation was invoked after the scheduler stopped.
    #[error("scheduler has been stopped")]
    Stopped,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
    /// The worker thread terminated abnormally and could not be joined.
    #[error("worker thread panicked")]
    WorkerPanicked,
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
