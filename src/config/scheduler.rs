//! Scheduler configuration structures.

use serde::{Deserialize, Serialize};

/// Default worker thread name.
const DEFAULT_THREAD_NAME: &str = "tasklane-worker";

/// Default worker thread stack size (2 MiB, the platform default on most
/// targets).
const DEFAULT_STACK_SIZE: usize = 2 * 1024 * 1024;

/// Configuration for a scheduler's worker thread.
///
/// The scheduler itself takes no tuning parameters; this only names and
/// sizes the one OS thread it spawns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Name assigned to the worker thread.
    pub worker_thread_name: String,
    /// Stack size for the worker thread, in bytes.
    pub worker_stack_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            worker_thread_name: DEFAULT_THREAD_NAME.to_string(),
            worker_stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl SchedulerConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the worker thread name.
    #[must_use]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.worker_thread_name = name.into();
        self
    }

    /// Set the worker thread stack size in bytes.
    #[must_use]
    pub const fn with_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = bytes;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.worker_thread_name.is_empty() {
            return Err("worker_thread_name must not be empty".into());
        }
        if self.worker_stack_size == 0 {
            return Err("worker_stack_size must be greater than 0".into());
        }
        Ok(())
    }

    /// Parse a configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns a parse or validation error description.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
