//! Task representation: a priority paired with a unit of work.

use std::fmt;

/// Boxed unit of work executed by the worker.
///
/// The closure may capture arbitrary state; the scheduler never inspects it.
pub type Work = Box<dyn FnOnce() + Send + 'static>;

/// A priority-tagged unit of deferred work.
///
/// Immutable once created. Ownership passes from the submitting caller into
/// the pending queue, then to the worker for the duration of the call, after
/// which the task is discarded.
pub struct Task {
    /// Priority used for queue ordering; larger values run first.
    priority: i32,
    /// Monotonic submission sequence; breaks ties FIFO within a priority.
    seq: u64,
    /// The work to execute.
    work: Work,
}

impl Task {
    /// Create a task from its ordering keys and payload.
    ///
    /// `seq` breaks ties between equal priorities (smaller runs first); the
    /// scheduler assigns it from a monotonic counter at submission.
    #[must_use]
    pub fn new(priority: i32, seq: u64, work: Work) -> Self {
        Self {
            priority,
            seq,
            work,
        }
    }

    /// Priority assigned at submission; larger values run first.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Submission sequence number, unique per scheduler instance.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Consume the task and execute its work.
    pub fn run(self) {
        (self.work)();
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("priority", &self.priority)
            .field("seq", &self.seq)
            .finish_non_exhaustive()
    }
}
