//! Stress fan-out specs
//!
//! Verify every invocation runs exactly once and failures stop the run.

use crate::prelude::*;
use similar_asserts::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn thousand_invocations_record_every_index() {
    let counter = Guarded::new(0usize);
    let shared = counter.clone();

    let mut indices = StressRunner::new()
        .with_iterations(1_000)
        .with_jitter(Jitter::Uniform(Duration::from_micros(1)))
        .perform(move |_| {
            let counter = shared.clone();
            async move { Ok::<_, SpecError>(next_index(&counter)) }
        })
        .await
        .unwrap();

    indices.sort_unstable();
    assert_eq!(indices, (0..1_000).collect::<Vec<_>>());
    assert_eq!(counter.get(), 1_000);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn default_stress_runs_every_index() {
    let counter = Guarded::new(0usize);
    let shared = counter.clone();

    let mut indices = stress(move |_| {
        let counter = shared.clone();
        async move { Ok::<_, SpecError>(next_index(&counter)) }
    })
    .await
    .unwrap();

    indices.sort_unstable();
    assert_eq!(indices.len(), 1_000);
    assert_eq!(indices.first(), Some(&0));
    assert_eq!(indices.last(), Some(&999));
}

#[tokio::test(start_paused = true)]
async fn first_failure_stops_remaining_invocations() {
    let started = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicUsize::new(0));
    let (s, f) = (Arc::clone(&started), Arc::clone(&finished));

    let err = run_fan_out(100, Jitter::None, move || {
        let index = s.fetch_add(1, Ordering::SeqCst);
        let finished = Arc::clone(&f);
        async move {
            if index == 7 {
                return Err(SpecError::Invocation(index));
            }
            tokio::time::sleep(Duration::from_secs(10)).await;
            finished.fetch_add(1, Ordering::SeqCst);
            Ok(index)
        }
    })
    .await
    .unwrap_err();

    assert_eq!(err, SpecError::Invocation(7));
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(finished.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn manual_confirmation_is_required() {
    StressRunner::new()
        .with_name("manual")
        .with_iterations(20)
        .with_auto_confirm(false)
        .with_timeout(Duration::from_millis(300))
        .perform(|confirmation| async move {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                confirmation.signal();
            });
            Ok::<_, SpecError>(())
        })
        .await
        .unwrap();

    let err = StressRunner::new()
        .with_name("manual")
        .with_iterations(20)
        .with_auto_confirm(false)
        .with_timeout(Duration::from_millis(300))
        .perform(|_| async { Ok::<_, SpecError>(()) })
        .await
        .unwrap_err();

    assert_eq!(
        err,
        SpecError::Harness(ConfirmError::Timeout {
            name: "manual".to_string(),
            expected: 20,
            actual: 0,
        })
    );
}
