//! Scheduler owning the pending queue, the shutdown flag, and the one worker.
//!
//! # Design
//!
//! - **One lock**: the queue and the shutdown flag live together in
//!   `SchedulerState` behind a single `parking_lot::Mutex`; a `Condvar`
//!   wakes the worker when either the queue becomes non-empty or shutdown is
//!   requested.
//! - **Explicit lifecycle**: `Idle -> Running -> Stopped`, with loud
//!   [`SchedulerError`] results on misuse instead of undefined behavior.
//! - **Drain on stop**: shutdown only completes once the queue is empty; the
//!   stopping thread joins the worker before returning.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, info, warn};

use crate::config::SchedulerConfig;
use crate::core::error::SchedulerError;
use crate::core::queue::PendingQueue;
use crate::core::task::Task;
use crate::core::worker;

/// Lifecycle states of a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed; no worker running. Submissions queue up for `start`.
    Idle,
    /// The worker thread is consuming tasks.
    Running,
    /// Shutdown has begun or completed; the instance is inert.
    Stopped,
}

/// Queue and shutdown flag, guarded together by the one shared lock.
pub(crate) struct SchedulerState {
    pub(crate) queue: PendingQueue,
    pub(crate) shutdown: bool,
}

/// Execution counters shared with the worker (lock-free atomics).
#[derive(Debug, Default)]
pub(crate) struct SchedulerCounters {
    pub(crate) submitted_tasks: AtomicU64,
    pub(crate) executed_tasks: AtomicU64,
    pub(crate) panicked_tasks: AtomicU64,
}

/// State shared between the scheduler handle and the worker thread.
pub(crate) struct Shared {
    /// The single lock protecting the queue and the shutdown flag.
    pub(crate) state: Mutex<SchedulerState>,
    /// Signaled when the queue becomes non-empty or shutdown is requested.
    pub(crate) work_ready: Condvar,
    /// Execution counters.
    pub(crate) counters: SchedulerCounters,
}

/// Snapshot of scheduler utilization and outcomes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerStats {
    /// Total tasks accepted by [`Scheduler::submit`].
    pub submitted_tasks: u64,
    /// Tasks executed to completion.
    pub executed_tasks: u64,
    /// Tasks whose body panicked; isolated and counted, never re-run.
    pub panicked_tasks: u64,
    /// Tasks currently waiting in the queue.
    pub pending_tasks: usize,
}

/// In-process priority task scheduler with a single background worker.
///
/// All methods take `&self`; interior state is guarded by `parking_lot`
/// mutexes so a scheduler can be shared across threads behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use tasklane::core::Scheduler;
///
/// let scheduler = Scheduler::new();
/// scheduler.start().unwrap();
/// scheduler.submit(10, || println!("urgent")).unwrap();
/// scheduler.stop().unwrap();
/// ```
pub struct Scheduler {
    /// Worker thread configuration.
    config: SchedulerConfig,
    /// State shared with the worker thread.
    shared: Arc<Shared>,
    /// Lifecycle state machine; not shared with the worker.
    lifecycle: Mutex<Lifecycle>,
    /// Worker thread handle, present only while `Running`.
    worker: Mutex<Option<JoinHandle<()>>>,
    /// Source of submission sequence numbers (FIFO tie-break).
    next_seq: AtomicU64,
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("lifecycle", &*self.lifecycle.lock())
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    /// Create an idle scheduler with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SchedulerConfig::default(),
            shared: Arc::new(Shared {
                state: Mutex::new(SchedulerState {
                    queue: PendingQueue::new(),
                    shutdown: false,
                }),
                work_ready: Condvar::new(),
                counters: SchedulerCounters::default(),
            }),
            lifecycle: Mutex::new(Lifecycle::Idle),
            worker: Mutex::new(None),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Create an idle scheduler with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidConfig`] if the configuration is
    /// invalid.
    pub fn with_config(config: SchedulerConfig) -> Result<Self, SchedulerError> {
        config.validate().map_err(SchedulerError::InvalidConfig)?;
        let mut scheduler = Self::new();
        scheduler.config = config;
        Ok(scheduler)
    }

    /// Submit a unit of work with a priority; larger values run first.
    ///
    /// Thread-safe: may be called concurrently from any number of threads,
    /// before or after [`start`](Self::start). The task is pushed under the
    /// shared lock and the worker is woken if it is waiting. The call never
    /// blocks beyond brief lock contention; queue depth is unbounded.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Stopped`] once [`stop`](Self::stop) has
    /// begun. A submit racing `stop` may observe either outcome.
    pub fn submit<F>(&self, priority: i32, work: F) -> Result<(), SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        {
            let lifecycle = self.lifecycle.lock();
            if *lifecycle == Lifecycle::Stopped {
                return Err(SchedulerError::Stopped);
            }
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let task = Task::new(priority, seq, Box::new(work));
        {
            let mut state = self.shared.state.lock();
            state.queue.push(task);
        }
        self.shared
            .counters
            .submitted_tasks
            .fetch_add(1, Ordering::Relaxed);
        self.shared.work_ready.notify_one();

        debug!(priority, seq, "task submitted");
        Ok(())
    }

    /// Spawn the single worker thread and transition to `Running`.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::AlreadyStarted`] if the scheduler is running.
    /// - [`SchedulerError::Stopped`] if it has already been stopped.
    /// - [`SchedulerError::Spawn`] if the OS refuses the thread.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let mut lifecycle = self.lifecycle.lock();
        match *lifecycle {
            Lifecycle::Running => return Err(SchedulerError::AlreadyStarted),
            Lifecycle::Stopped => return Err(SchedulerError::Stopped),
            Lifecycle::Idle => {}
        }

        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name(self.config.worker_thread_name.clone())
            .stack_size(self.config.worker_stack_size)
            .spawn(move || worker::run(&shared))?;

        *self.worker.lock() = Some(handle);
        *lifecycle = Lifecycle::Running;

        info!(
            thread = %self.config.worker_thread_name,
            "scheduler started"
        );
        Ok(())
    }

    /// Request shutdown, wait for the worker to drain the queue, and join it.
    ///
    /// Sets the shutdown flag under the shared lock, wakes the worker, then
    /// blocks the calling thread until the worker has executed every task
    /// submitted strictly before the flag was observed and exited.
    ///
    /// # Errors
    ///
    /// - [`SchedulerError::NotRunning`] if the scheduler was never started.
    /// - [`SchedulerError::Stopped`] if it has already been stopped.
    /// - [`SchedulerError::WorkerPanicked`] if the worker thread could not
    ///   be joined cleanly.
    pub fn stop(&self) -> Result<(), SchedulerError> {
        {
            let mut lifecycle = self.lifecycle.lock();
            match *lifecycle {
                Lifecycle::Idle => return Err(SchedulerError::NotRunning),
                Lifecycle::Stopped => return Err(SchedulerError::Stopped),
                Lifecycle::Running => {}
            }
            *lifecycle = Lifecycle::Stopped;
        }

        self.signal_and_join()?;
        info!("scheduler stopped, queue drained");
        Ok(())
    }

    /// Snapshot of current counters and queue depth.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        let pending_tasks = self.shared.state.lock().queue.len();
        let counters = &self.shared.counters;
        SchedulerStats {
            submitted_tasks: counters.submitted_tasks.load(Ordering::Relaxed),
            executed_tasks: counters.executed_tasks.load(Ordering::Relaxed),
            panicked_tasks: counters.panicked_tasks.load(Ordering::Relaxed),
            pending_tasks,
        }
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        *self.lifecycle.lock()
    }

    /// Set the shutdown flag, wake the worker, and join its thread.
    fn signal_and_join(&self) -> Result<(), SchedulerError> {
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
        }
        self.shared.work_ready.notify_one();

        let handle = self.worker.lock().take();
        if let Some(handle) = handle {
            handle.join().map_err(|_| SchedulerError::WorkerPanicked)?;
        }
        Ok(())
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        let was_running = {
            let mut lifecycle = self.lifecycle.lock();
            if *lifecycle == Lifecycle::Running {
                *lifecycle = Lifecycle::Stopped;
                true
            } else {
                false
            }
        };

        if was_running {
            debug!("scheduler dropped while running; draining queue");
            if self.signal_and_join().is_err() {
                warn!("worker thread panicked during drop");
            }
        }
    }
}
