//! Shared imports and helpers for specs

pub use ck_core::{
    confirm, run_fan_out, stress, Confirmable, ConfirmError, ConfirmationRunner, Guarded,
    HarnessConfig, Jitter, StressRunner,
};
pub use ck_stubs::{CallMonitor, InterceptedCall, ResponseStub};
pub use std::time::Duration;
pub use tokio::time::Instant;

/// Error type of the code under test in specs
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("invocation {0} failed")]
    Invocation(usize),
    #[error(transparent)]
    Harness(#[from] ConfirmError),
}

/// Hand out increasing indices from a shared counter
pub fn next_index(counter: &Guarded<usize>) -> usize {
    counter.with(|c| {
        let index = *c;
        *c += 1;
        index
    })
}
