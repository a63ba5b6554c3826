//! Integration tests for the scheduler.
//!
//! These tests validate the end-to-end contract:
//! - Priority ordering when draining a queued backlog
//! - FIFO ordering within equal priorities
//! - Drain-on-stop: everything submitted before stop runs exactly once
//! - Idle safety: start + stop with no work returns promptly
//! - Concurrent submission from many producer threads
//! - Lifecycle misuse failing loudly
//! - Drop-while-running draining the queue
//! - Panic isolation for task bodies

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use tasklane::core::{AppResult, Scheduler, SchedulerError};

// ============================================================================
// HELPERS
// ============================================================================

/// Submit a task that reports its tag on a channel when executed.
fn submit_reporting(
    scheduler: &Scheduler,
    priority: i32,
    tag: i32,
    tx: &crossbeam_channel::Sender<i32>,
) {
    let tx = tx.clone();
    scheduler
        .submit(priority, move || {
            tx.send(tag).expect("collector alive");
        })
        .expect("submit accepted");
}

// ============================================================================
// PRIORITY ORDERING
// ============================================================================

/// Submit priorities 2, 1, 3 before the worker can run; execution order
/// must be 3, 2, 1.
#[test]
fn test_priority_ordering_for_queued_backlog() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let scheduler = Scheduler::new();

    submit_reporting(&scheduler, 2, 2, &tx);
    submit_reporting(&scheduler, 1, 1, &tx);
    submit_reporting(&scheduler, 3, 3, &tx);

    scheduler.start().unwrap();
    scheduler.stop().unwrap();
    drop(tx);

    let order: Vec<i32> = rx.iter().collect();
    assert_eq!(order, vec![3, 2, 1]);
}

#[test]
fn test_priority_order_non_increasing_over_random_backlog() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let scheduler = Scheduler::new();
    let mut rng = rand::rng();

    for _ in 0..200 {
        let priority = rng.random_range(-50..50);
        submit_reporting(&scheduler, priority, priority, &tx);
    }

    scheduler.start().unwrap();
    scheduler.stop().unwrap();
    drop(tx);

    let order: Vec<i32> = rx.iter().collect();
    assert_eq!(order.len(), 200);
    for pair in order.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "priority order violated: {} ran before {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_fifo_within_equal_priority() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let scheduler = Scheduler::new();

    for tag in 0..20 {
        submit_reporting(&scheduler, 7, tag, &tx);
    }

    scheduler.start().unwrap();
    scheduler.stop().unwrap();
    drop(tx);

    let order: Vec<i32> = rx.iter().collect();
    assert_eq!(order, (0..20).collect::<Vec<_>>());
}

// ============================================================================
// DRAIN AND LIFECYCLE
// ============================================================================

#[test]
fn test_drain_on_stop_runs_each_task_exactly_once() {
    let scheduler = Scheduler::new();
    scheduler.start().unwrap();

    let executions: Vec<Arc<AtomicUsize>> =
        (0..100).map(|_| Arc::new(AtomicUsize::new(0))).collect();

    for (i, counter) in executions.iter().enumerate() {
        let counter = Arc::clone(counter);
        let priority = i32::try_from(i % 5).expect("small priority");
        scheduler
            .submit(priority, move || {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
    }

    scheduler.stop().unwrap();

    for (i, counter) in executions.iter().enumerate() {
        assert_eq!(counter.load(Ordering::SeqCst), 1, "task {i} execution count");
    }

    let stats = scheduler.stats();
    assert_eq!(stats.submitted_tasks, 100);
    assert_eq!(stats.executed_tasks, 100);
    assert_eq!(stats.pending_tasks, 0);
}

#[test]
fn test_idle_stop_returns_promptly_with_zero_executions() {
    let scheduler = Scheduler::new();
    scheduler.start().unwrap();

    let started = Instant::now();
    scheduler.stop().unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(5), "stop took {elapsed:?}");
    assert_eq!(scheduler.stats().executed_tasks, 0);
}

#[test]
fn test_submit_wakes_blocked_worker() {
    let scheduler = Scheduler::new();
    scheduler.start().unwrap();

    // Give the worker time to park on the condvar with an empty queue.
    thread::sleep(Duration::from_millis(50));

    let ran = Arc::new(AtomicUsize::new(0));
    let ran_clone = Arc::clone(&ran);
    scheduler
        .submit(1, move || {
            ran_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

    scheduler.stop().unwrap();
    assert_eq!(ran.load(Ordering::SeqCst), 1);
}

#[test]
fn test_lifecycle_misuse_fails_loudly() -> AppResult<()> {
    let scheduler = Scheduler::new();

    assert!(matches!(
        scheduler.stop(),
        Err(SchedulerError::NotRunning)
    ));

    scheduler.start()?;
    assert!(matches!(
        scheduler.start(),
        Err(SchedulerError::AlreadyStarted)
    ));

    scheduler.stop()?;
    assert!(matches!(scheduler.stop(), Err(SchedulerError::Stopped)));
    assert!(matches!(
        scheduler.submit(1, || {}),
        Err(SchedulerError::Stopped)
    ));
    assert!(matches!(scheduler.start(), Err(SchedulerError::Stopped)));

    Ok(())
}

#[test]
fn test_drop_while_running_drains_queue() {
    let executed = Arc::new(AtomicUsize::new(0));

    {
        let scheduler = Scheduler::new();
        scheduler.start().unwrap();
        for _ in 0..50 {
            let executed = Arc::clone(&executed);
            scheduler
                .submit(1, move || {
                    executed.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        }
        // Dropped without an explicit stop.
    }

    assert_eq!(executed.load(Ordering::SeqCst), 50);
}

// ============================================================================
// CONCURRENT SUBMISSION
// ============================================================================

#[test]
fn test_concurrent_submission_executes_each_exactly_once() {
    const PRODUCERS: i32 = 8;
    const TASKS_PER_PRODUCER: i32 = 50;

    let (tx, rx) = crossbeam_channel::unbounded();
    let scheduler = Arc::new(Scheduler::new());
    scheduler.start().unwrap();

    let mut producers = Vec::new();
    for producer in 0..PRODUCERS {
        let scheduler = Arc::clone(&scheduler);
        let tx = tx.clone();
        producers.push(thread::spawn(move || {
            for i in 0..TASKS_PER_PRODUCER {
                let id = producer * TASKS_PER_PRODUCER + i;
                let tx = tx.clone();
                scheduler
                    .submit(id % 4, move || {
                        tx.send(id).expect("collector alive");
                    })
                    .expect("submit accepted while running");
            }
        }));
    }
    for producer in producers {
        producer.join().expect("producer thread");
    }

    scheduler.stop().unwrap();
    drop(tx);

    let seen: Vec<i32> = rx.iter().collect();
    let distinct: HashSet<i32> = seen.iter().copied().collect();
    let expected = usize::try_from(PRODUCERS * TASKS_PER_PRODUCER).expect("positive");
    assert_eq!(seen.len(), expected);
    assert_eq!(distinct.len(), seen.len(), "duplicate executions observed");
}

// ============================================================================
// PANIC ISOLATION
// ============================================================================

#[test]
fn test_panicking_task_does_not_stop_worker() {
    let (tx, rx) = crossbeam_channel::unbounded();
    let scheduler = Scheduler::new();

    submit_reporting(&scheduler, 3, 1, &tx);
    scheduler
        .submit(2, || panic!("task body failure"))
        .unwrap();
    submit_reporting(&scheduler, 1, 2, &tx);

    scheduler.start().unwrap();
    scheduler.stop().unwrap();
    drop(tx);

    let order: Vec<i32> = rx.iter().collect();
    assert_eq!(order, vec![1, 2], "tasks after the panic still ran");

    let stats = scheduler.stats();
    assert_eq!(stats.submitted_tasks, 3);
    assert_eq!(stats.executed_tasks, 2);
    assert_eq!(stats.panicked_tasks, 1);
}
