// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fan-out of synchronous operations across OS threads
//!
//! For code under test that is blocking rather than async. Invocations are
//! spread over a bounded pool of scoped threads sized by the available
//! parallelism; each one sleeps for its jitter delay, then runs with its
//! invocation index.

use crate::fan_out::Jitter;
use crate::guarded::Guarded;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};

const FALLBACK_WORKERS: usize = 4;

/// Run `count` invocations of `operation` on a thread pool
///
/// Results are returned in completion order. A panic in any invocation is
/// propagated to the caller once all threads have stopped.
pub fn run_threads<R, F>(count: usize, jitter: Jitter, operation: F) -> Vec<R>
where
    F: Fn(usize) -> R + Sync,
    R: Send,
{
    let workers = std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKERS)
        .min(count);
    let next = AtomicUsize::new(0);
    let results = Guarded::new(Vec::with_capacity(count));

    let (next, results_ref, operation) = (&next, &results, &operation);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(move || loop {
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    if index >= count {
                        break;
                    }
                    let delay = jitter.sample();
                    if !delay.is_zero() {
                        std::thread::sleep(delay);
                    }
                    let value = operation(index);
                    results_ref.with(|r| r.push(value));
                })
            })
            .collect();

        // Joined by hand so the original panic payload reaches the caller
        for handle in handles {
            if let Err(payload) = handle.join() {
                std::panic::resume_unwind(payload);
            }
        }
    });

    tracing::debug!(count, workers, "thread fan-out complete");
    results.replace(Vec::new())
}
