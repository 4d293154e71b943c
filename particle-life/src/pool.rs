// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Fixed-size worker pool with an explicit drain barrier
//!
//! This module provides the task scheduler used by the simulation driver:
//! a bounded set of long-lived worker threads consuming a FIFO queue of
//! zero-argument work items, plus a `wait_idle` barrier that blocks until
//! every item submitted so far has completed. The pool knows nothing about
//! the simulation; side effects belong entirely to the submitted tasks.
//!
//! A task that panics is caught per task, reported, and still counted as
//! finished so the barrier can never hang on a poisoned counter.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// A queued unit of work: created at submission, consumed exactly once.
type Task = Box<dyn FnOnce() + Send + 'static>;

/// Statistics for monitoring pool activity
#[derive(Debug, Clone, Default)]
pub struct PoolStats {
    /// Total number of tasks submitted over the pool's lifetime
    pub submitted: usize,
    /// Number of tasks that ran to completion
    pub completed: usize,
    /// Number of tasks that panicked and were caught
    pub panicked: usize,
    /// Number of worker threads in the pool
    pub workers: usize,
}

/// Queue state guarded by a single mutex
struct PoolState {
    queue: VecDeque<Task>,
    /// Tasks submitted but not yet finished (queued or executing)
    outstanding: usize,
    shutdown: bool,
}

struct Shared {
    state: Mutex<PoolState>,
    /// Signalled on submit and on shutdown
    work_available: Condvar,
    /// Signalled when `outstanding` returns to zero
    all_idle: Condvar,
    stats: Mutex<PoolStats>,
}

/// A fixed pool of worker threads executing submitted tasks in FIFO pop order
///
/// Completion order among tasks is not guaranteed; the only ordering
/// primitive is [`TaskPool::wait_idle`], which establishes a full barrier
/// between the caller and every previously submitted task.
///
/// # Examples
///
/// ```
/// use particle_life::pool::TaskPool;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let pool = TaskPool::new(4);
/// let counter = Arc::new(AtomicUsize::new(0));
/// for _ in 0..100 {
///     let counter = Arc::clone(&counter);
///     pool.submit(move || { counter.fetch_add(1, Ordering::Relaxed); });
/// }
/// pool.wait_idle();
/// assert_eq!(counter.load(Ordering::Relaxed), 100);
/// ```
pub struct TaskPool {
    shared: Arc<Shared>,
    handles: Vec<JoinHandle<()>>,
}

impl TaskPool {
    /// Create a pool with the given number of worker threads
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero. Configuration-level validation lives in
    /// [`crate::SimConfig::validate`]; a zero-width pool here is a
    /// programming error.
    pub fn new(workers: usize) -> Self {
        assert!(workers > 0, "Worker count must be nonzero");

        let shared = Arc::new(Shared {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                outstanding: 0,
                shutdown: false,
            }),
            work_available: Condvar::new(),
            all_idle: Condvar::new(),
            stats: Mutex::new(PoolStats {
                workers,
                ..PoolStats::default()
            }),
        });

        let handles = (0..workers)
            .map(|i| {
                let shared = Arc::clone(&shared);
                thread::Builder::new()
                    .name(format!("particle-life-worker-{i}"))
                    .spawn(move || worker_loop(&shared))
                    .expect("Failed to spawn pool worker thread")
            })
            .collect();

        TaskPool { shared, handles }
    }

    /// Create a pool sized to the available hardware concurrency
    pub fn with_default_workers() -> Self {
        Self::new(default_worker_count())
    }

    /// Submit a task for execution; never blocks the caller
    ///
    /// The task is appended to the FIFO queue, the outstanding counter is
    /// bumped, and one idle worker is woken.
    pub fn submit<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // LOCK ORDERING: state first, then stats, never held together
        {
            let mut state = self.shared.state.lock().unwrap();
            state.queue.push_back(Box::new(task));
            state.outstanding += 1;
        } // state lock released here

        {
            let mut stats = self.shared.stats.lock().unwrap();
            stats.submitted += 1;
        } // stats lock released here

        self.shared.work_available.notify_one();
    }

    /// Block until every task submitted so far has finished
    ///
    /// Returns immediately when nothing is queued or in flight. Safe to
    /// call repeatedly; each call is a full barrier with respect to the
    /// side effects of previously submitted tasks.
    pub fn wait_idle(&self) {
        let mut state = self.shared.state.lock().unwrap();
        while state.outstanding > 0 {
            state = self.shared.all_idle.wait(state).unwrap();
        }
    }

    /// Number of tasks submitted but not yet finished
    pub fn outstanding(&self) -> usize {
        self.shared.state.lock().unwrap().outstanding
    }

    /// Number of worker threads
    pub fn workers(&self) -> usize {
        self.handles.len()
    }

    /// Snapshot of the pool's activity counters
    pub fn stats(&self) -> PoolStats {
        self.shared.stats.lock().unwrap().clone()
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            state.shutdown = true;
        }
        self.shared.work_available.notify_all();

        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                tracing::error!("pool worker thread terminated abnormally");
            }
        }
    }
}

/// Pick a worker count from the host's available parallelism
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(4)
}

fn worker_loop(shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock().unwrap();
            loop {
                // Drain the queue before honoring shutdown, so items
                // already accepted are not dropped silently.
                if let Some(task) = state.queue.pop_front() {
                    break Some(task);
                }
                if state.shutdown {
                    break None;
                }
                state = shared.work_available.wait(state).unwrap();
            }
        }; // state lock released here

        let Some(task) = task else {
            return;
        };

        let result = panic::catch_unwind(AssertUnwindSafe(task));

        {
            let mut stats = shared.stats.lock().unwrap();
            match &result {
                Ok(()) => stats.completed += 1,
                Err(_) => stats.panicked += 1,
            }
        } // stats lock released here

        if let Err(payload) = result {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "non-string panic payload".to_string());
            tracing::error!(%message, "worker task panicked; counter still decremented");
        }

        let mut state = shared.state.lock().unwrap();
        state.outstanding -= 1;
        if state.outstanding == 0 {
            shared.all_idle.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn test_pool_creation() {
        let pool = TaskPool::new(2);
        assert_eq!(pool.workers(), 2);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    #[should_panic(expected = "Worker count must be nonzero")]
    fn test_zero_workers_panics() {
        TaskPool::new(0);
    }

    #[test]
    fn test_wait_idle_on_empty_pool_returns_immediately() {
        let pool = TaskPool::new(2);
        pool.wait_idle();
        pool.wait_idle();
    }

    #[test]
    fn test_tasks_execute() {
        let pool = TaskPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));

        for _ in 0..256 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.wait_idle();

        assert_eq!(counter.load(Ordering::Relaxed), 256);
        assert_eq!(pool.outstanding(), 0);
    }

    #[test]
    fn test_repeated_barriers_across_frames() {
        let pool = TaskPool::new(3);
        let counter = Arc::new(AtomicUsize::new(0));

        for frame in 1..=10 {
            for _ in 0..50 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                });
            }
            pool.wait_idle();
            assert_eq!(counter.load(Ordering::Relaxed), frame * 50);
        }
    }

    #[test]
    fn test_panicking_task_does_not_hang_barrier() {
        let pool = TaskPool::new(2);
        let counter = Arc::new(AtomicUsize::new(0));

        pool.submit(|| panic!("task failure"));
        for _ in 0..10 {
            let counter = Arc::clone(&counter);
            pool.submit(move || {
                counter.fetch_add(1, Ordering::Relaxed);
            });
        }
        pool.wait_idle();

        assert_eq!(counter.load(Ordering::Relaxed), 10);
        let stats = pool.stats();
        assert_eq!(stats.panicked, 1);
        assert_eq!(stats.completed, 10);
        assert_eq!(stats.submitted, 11);
    }

    #[test]
    fn test_stats_tracking() {
        let pool = TaskPool::new(2);
        for _ in 0..5 {
            pool.submit(|| {});
        }
        pool.wait_idle();

        let stats = pool.stats();
        assert_eq!(stats.submitted, 5);
        assert_eq!(stats.completed, 5);
        assert_eq!(stats.panicked, 0);
        assert_eq!(stats.workers, 2);
    }

    #[test]
    fn test_drop_joins_workers_with_work_in_flight() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = TaskPool::new(2);
            for _ in 0..20 {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    thread::sleep(Duration::from_micros(100));
                    counter.fetch_add(1, Ordering::Relaxed);
                });
            }
        } // Drop drains the queue and joins
        assert_eq!(counter.load(Ordering::Relaxed), 20);
    }

    #[test]
    fn test_default_worker_count_is_nonzero() {
        assert!(default_worker_count() > 0);
    }
}
