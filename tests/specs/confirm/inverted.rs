//! Inverted confirmation specs
//!
//! An expected count of zero asserts that nothing signals.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test(start_paused = true)]
async fn unsignalled_succeeds_only_after_timeout() {
    let timeout = Duration::from_millis(750);
    let started = Instant::now();

    ConfirmationRunner::new()
        .with_expected_count(0)
        .with_timeout(timeout)
        .perform(|_| async { Ok::<_, SpecError>(()) })
        .await
        .unwrap();

    assert!(started.elapsed() >= timeout);
}

#[tokio::test(start_paused = true)]
async fn single_signal_fails() {
    let err = ConfirmationRunner::new()
        .with_expected_count(0)
        .with_name("no callbacks")
        .with_timeout(Duration::from_millis(750))
        .perform(|confirmation| async move {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                confirmation.signal();
            });
            Ok::<_, SpecError>(())
        })
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "timeout waiting for confirmation: no callbacks. expected count: 0, actual count: 1"
    );
}
