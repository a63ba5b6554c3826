//! # Tasklane
//!
//! A minimal in-process priority task scheduler with a single background worker.
//!
//! Callers submit units of work tagged with an integer priority; one dedicated
//! worker thread executes them highest-priority-first and drains every pending
//! task to completion on shutdown. The crate is the scheduler itself: the
//! mutex-guarded priority queue, the producer/consumer signaling protocol, and
//! the start/stop lifecycle. There is no thread pool, no cancellation, no
//! retry, and no persistence.
//!
//! ## Core Pieces
//!
//! - **Task**: a priority-tagged boxed closure. Ownership moves from the
//!   caller into the pending queue and finally into the worker's invocation.
//! - **PendingQueue**: a binary heap yielding the highest-priority task first,
//!   FIFO within equal priorities.
//! - **Scheduler**: owns the queue, the shutdown flag, and the worker thread;
//!   coordinates producers and the one consumer with a mutex and a condvar.
//!
//! ## Lifecycle
//!
//! A scheduler is constructed `Idle`, moves to `Running` on [`start`], and to
//! `Stopped` on [`stop`]. Lifecycle misuse (double start, submit after stop)
//! fails loudly with [`SchedulerError`] instead of corrupting state. Dropping
//! a running scheduler performs the full stop protocol, so no worker thread
//! outlives its owner.
//!
//! [`start`]: core::Scheduler::start
//! [`stop`]: core::Scheduler::stop
//! [`SchedulerError`]: core::SchedulerError
//!
//! ## Example
//!
//! ```rust
//! use tasklane::core::Scheduler;
//!
//! let scheduler = Scheduler::new();
//! scheduler.start().expect("idle scheduler starts");
//!
//! scheduler.submit(2, || println!("medium")).unwrap();
//! scheduler.submit(1, || println!("low")).unwrap();
//! scheduler.submit(3, || println!("high")).unwrap();
//!
//! // Blocks until every pending task has executed and the worker exited.
//! scheduler.stop().expect("running scheduler stops");
//! ```
//!
//! ## Guarantees
//!
//! - Tasks drained from a quiescent queue run in non-increasing priority
//!   order; equal priorities run in submission order.
//! - Every task submitted before `stop` is observed runs exactly once before
//!   `stop` returns.
//! - A panicking task body is isolated, logged, and counted; the worker loop
//!   continues with the next task.
//!
//! For complete scenarios, see `tests/scheduler_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling types: task, queue, scheduler, worker loop, errors.
pub mod core;
/// Configuration model for the worker thread.
pub mod config;
/// Shared utilities.
pub mod util;
