//! The single worker loop: wait for work, pop the highest priority, execute.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::Ordering;

use tracing::{debug, error, trace};

use crate::core::scheduler::Shared;

/// Run the scheduling loop until shutdown is requested and the queue drains.
///
/// Each cycle re-evaluates under the shared lock: suspend while the queue is
/// empty and shutdown has not been requested; exit once shutdown is requested
/// and the queue is empty; otherwise pop the highest-priority task, release
/// the lock, and execute the task on this thread. Execution is never
/// interrupted or time-limited. A panicking task body is caught, logged, and
/// counted so the loop continues with the next task.
pub(crate) fn run(shared: &Shared) {
    debug!("worker thread started");

    loop {
        let task = {
            let mut state = shared.state.lock();
            shared
                .work_ready
                .wait_while(&mut state, |s| s.queue.is_empty() && !s.shutdown);

            if state.shutdown && state.queue.is_empty() {
                break;
            }
            // Non-empty here: wait_while only returns on work or shutdown,
            // and the empty-and-shutdown case exited above.
            let Some(task) = state.queue.pop_max() else {
                continue;
            };
            task
        };

        let priority = task.priority();
        let seq = task.seq();
        trace!(priority, seq, "executing task");

        match catch_unwind(AssertUnwindSafe(|| task.run())) {
            Ok(()) => {
                shared
                    .counters
                    .executed_tasks
                    .fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                shared
                    .counters
                    .panicked_tasks
                    .fetch_add(1, Ordering::Relaxed);
                error!(priority, seq, "task panicked; worker continues");
            }
        }
    }

    debug!("worker thread exiting");
}
