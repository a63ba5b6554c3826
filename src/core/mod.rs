//! Core scheduling types: task, queue, scheduler, worker loop, errors.

pub mod error;
pub mod queue;
pub mod scheduler;
pub mod task;

mod worker;

pub use error::{AppResult, SchedulerError};
pub use queue::PendingQueue;
pub use scheduler::{Lifecycle, Scheduler, SchedulerStats};
pub use task::{Task, Work};
