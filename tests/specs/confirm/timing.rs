//! Confirmation timing specs
//!
//! Verify the runner resolves early on signals and fails at its deadline.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test(start_paused = true)]
async fn never_signalled_fails_at_deadline() {
    let timeout = Duration::from_millis(500);
    let started = Instant::now();

    let err = ConfirmationRunner::new()
        .with_name("never")
        .with_timeout(timeout)
        .perform(|_| async { Ok::<_, SpecError>(()) })
        .await
        .unwrap_err();

    let elapsed = started.elapsed();
    assert!(elapsed >= timeout);
    assert!(elapsed < timeout + Duration::from_millis(50), "took {:?}", elapsed);
    assert_eq!(
        err,
        SpecError::Harness(ConfirmError::Timeout {
            name: "never".to_string(),
            expected: 1,
            actual: 0,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn early_signal_resolves_before_deadline() {
    let started = Instant::now();

    let value = ConfirmationRunner::new()
        .with_timeout(Duration::from_secs(10))
        .perform(|confirmation| async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            confirmation.signal();
            Ok::<_, SpecError>(42)
        })
        .await
        .unwrap();

    assert_eq!(value, 42);
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_secs(1), "took {:?}", elapsed);
}

#[tokio::test]
async fn default_confirm_returns_value() {
    let value = confirm(|confirmation| async move {
        confirmation.signal();
        Ok::<_, SpecError>("done")
    })
    .await
    .unwrap();
    assert_eq!(value, "done");
}

#[tokio::test(start_paused = true)]
async fn detached_signal_is_observed() {
    let value = ConfirmationRunner::new()
        .with_timeout(Duration::from_secs(2))
        .perform(|confirmation| async move {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                confirmation.signal();
            });
            Ok::<_, SpecError>("returned immediately")
        })
        .await
        .unwrap();

    assert_eq!(value, "returned immediately");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn signals_from_parallel_threads_are_counted() {
    let value = ConfirmationRunner::new()
        .with_expected_count(64)
        .perform(|confirmation| async move {
            let handles: Vec<_> = (0..64)
                .map(|_| {
                    let confirmation = confirmation.clone();
                    std::thread::spawn(move || confirmation.signal())
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
            Ok::<_, SpecError>(confirmation.actual_count())
        })
        .await
        .unwrap();

    assert_eq!(value, 64);
}
