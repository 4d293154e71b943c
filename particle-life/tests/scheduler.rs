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
//! Liveness and barrier tests for the worker pool

use particle_life::pool::TaskPool;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Submit `count` tasks of varying duration and verify none are lost.
fn run_batch(pool: &TaskPool, count: usize, counter: &Arc<AtomicUsize>) {
    for i in 0..count {
        let counter = Arc::clone(counter);
        pool.submit(move || {
            // Stagger task durations so completion order scrambles
            if i % 7 == 0 {
                thread::sleep(Duration::from_micros((i % 5) as u64 * 50));
            }
            counter.fetch_add(1, Ordering::Relaxed);
        });
    }
}

#[test]
fn no_lost_wakeups_across_batch_sizes() {
    let pool = TaskPool::new(4);
    for count in [0, 1, 2, 16, 128, 1024, 4096] {
        let counter = Arc::new(AtomicUsize::new(0));
        run_batch(&pool, count, &counter);
        pool.wait_idle();
        assert_eq!(counter.load(Ordering::Relaxed), count, "count = {count}");
        assert_eq!(pool.outstanding(), 0);
    }
}

#[test]
fn barrier_holds_across_repeated_frames() {
    let pool = TaskPool::new(8);
    let counter = Arc::new(AtomicUsize::new(0));

    for frame in 1..=20 {
        run_batch(&pool, 200, &counter);
        pool.wait_idle();
        // Every side effect submitted so far is visible after the barrier
        assert_eq!(counter.load(Ordering::Relaxed), frame * 200);
    }
}

#[test]
fn wait_idle_with_no_work_returns_immediately() {
    let pool = TaskPool::new(2);
    for _ in 0..100 {
        pool.wait_idle();
    }
}

#[test]
fn single_worker_preserves_all_work() {
    let pool = TaskPool::new(1);
    let counter = Arc::new(AtomicUsize::new(0));
    run_batch(&pool, 2000, &counter);
    pool.wait_idle();
    assert_eq!(counter.load(Ordering::Relaxed), 2000);
}

#[test]
fn panicking_tasks_never_wedge_the_counter() {
    let pool = TaskPool::new(4);
    let counter = Arc::new(AtomicUsize::new(0));

    for i in 0..100 {
        let counter = Arc::clone(&counter);
        pool.submit(move || {
            if i % 10 == 0 {
                panic!("intentional task failure {i}");
            }
            counter.fetch_add(1, Ordering::Relaxed);
        });
    }
    pool.wait_idle();

    assert_eq!(counter.load(Ordering::Relaxed), 90);
    let stats = pool.stats();
    assert_eq!(stats.panicked, 10);
    assert_eq!(stats.completed, 90);
    assert_eq!(pool.outstanding(), 0);

    // The pool is still usable after failures
    let counter = Arc::new(AtomicUsize::new(0));
    run_batch(&pool, 50, &counter);
    pool.wait_idle();
    assert_eq!(counter.load(Ordering::Relaxed), 50);
}

#[test]
fn submissions_from_multiple_threads() {
    let pool = Arc::new(TaskPool::new(4));
    let counter = Arc::new(AtomicUsize::new(0));

    let submitters: Vec<_> = (0..4)
        .map(|_| {
            let pool = Arc::clone(&pool);
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..500 {
                    let counter = Arc::clone(&counter);
                    pool.submit(move || {
                        counter.fetch_add(1, Ordering::Relaxed);
                    });
                }
            })
        })
        .collect();

    for handle in submitters {
        handle.join().unwrap();
    }
    pool.wait_idle();
    assert_eq!(counter.load(Ordering::Relaxed), 2000);
}
