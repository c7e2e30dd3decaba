//! Call monitor specs
//!
//! Verify stubbed calls made under stress can be awaited and inspected.

use crate::prelude::*;
use similar_asserts::assert_eq;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stressed_calls_are_all_recorded() {
    let monitor = CallMonitor::new().with_timeout(Duration::from_secs(5));
    monitor
        .add_primary_stubs((0..50).map(|_| ResponseStub::for_target("/ping").with_body("pong")))
        .await;
    monitor.observe_primary(50);

    let interceptor = monitor.primary().clone();
    let replies = StressRunner::new()
        .with_iterations(50)
        .with_timeout(Duration::from_secs(5))
        .perform(move |_| {
            let interceptor = interceptor.clone();
            async move {
                let reply = interceptor
                    .handle(InterceptedCall::new("/ping"))
                    .await
                    .unwrap();
                Ok::<_, SpecError>(reply.body)
            }
        })
        .await
        .unwrap();

    assert!(replies.iter().all(|body| body == b"pong"));
    let targets = monitor.primary_targets().await.unwrap();
    assert_eq!(targets.len(), 50);
    assert!(targets.iter().all(|t| t == "/ping"));
}

#[tokio::test(start_paused = true)]
async fn detached_calls_complete_before_inspection() {
    let monitor = CallMonitor::new();
    monitor
        .add_secondary_stubs([ResponseStub::new().with_delay(Duration::from_millis(100))])
        .await;
    monitor.observe_secondary(1);

    let interceptor = monitor.secondary().clone();
    tokio::spawn(async move {
        let _ = interceptor.handle(InterceptedCall::new("/report")).await;
    });

    let calls = monitor.secondary_calls().await.unwrap();
    assert_eq!(calls, vec![InterceptedCall::new("/report")]);
}
