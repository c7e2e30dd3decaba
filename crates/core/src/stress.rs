// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stress runner: fan-out under a shared confirmation
//!
//! Expects one signal per iteration. With `auto_confirm` each successful
//! invocation signals on its own; without it the operation, or an object it
//! wires the confirmation into, must signal. A missing signal surfaces as a
//! timeout rather than a hang.

use crate::config::StressConfig;
use crate::confirmation::{Confirmable, Confirmation};
use crate::error::ConfirmError;
use crate::fan_out::{FanOutRunner, Jitter};
use crate::runner::ConfirmationRunner;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;

/// Runs many concurrent invocations that must all be confirmed in time
#[derive(Debug, Clone)]
pub struct StressRunner {
    name: String,
    iterations: usize,
    jitter: Jitter,
    timeout: Duration,
    auto_confirm: bool,
    poll_interval: Duration,
}

impl StressRunner {
    /// 1000 iterations, 1µs jitter, one second timeout, auto-confirm on
    pub fn new() -> Self {
        Self::from_config(&StressConfig::default())
    }

    pub fn from_config(config: &StressConfig) -> Self {
        Self {
            name: String::new(),
            iterations: config.iterations,
            jitter: config.jitter(),
            timeout: config.timeout,
            auto_confirm: config.auto_confirm,
            poll_interval: config.poll_interval,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn auto_confirm(&self) -> bool {
        self.auto_confirm
    }

    pub async fn perform<R, E, F, Fut>(&self, operation: F) -> Result<Vec<R>, E>
    where
        F: Fn(Confirmation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: From<ConfirmError> + Send + 'static,
    {
        self.perform_with_setup(|_| async {}, operation).await
    }

    /// Like [`perform`](Self::perform), running `setup` once before the fan-out
    pub async fn perform_with_setup<R, E, S, SFut, F, Fut>(
        &self,
        setup: S,
        operation: F,
    ) -> Result<Vec<R>, E>
    where
        S: FnOnce(Confirmation) -> SFut,
        SFut: Future<Output = ()>,
        F: Fn(Confirmation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: From<ConfirmError> + Send + 'static,
    {
        let runner = ConfirmationRunner::new()
            .with_name(self.name.clone())
            .with_expected_count(self.iterations)
            .with_timeout(self.timeout)
            .with_poll_interval(self.poll_interval);
        let fan_out = FanOutRunner::new(self.iterations, self.jitter);
        let auto_confirm = self.auto_confirm;
        let operation = Arc::new(operation);

        let span = tracing::info_span!(
            "stress",
            name = %self.name,
            iterations = self.iterations,
            auto_confirm,
        );

        runner
            .perform(move |confirmation| async move {
                setup(confirmation.clone()).await;
                fan_out
                    .run(move || {
                        let confirmation = confirmation.clone();
                        let operation = Arc::clone(&operation);
                        async move {
                            let result = operation(confirmation.clone()).await;
                            if auto_confirm && result.is_ok() {
                                confirmation.signal();
                            }
                            result
                        }
                    })
                    .await
            })
            .instrument(span)
            .await
    }
}

impl Default for StressRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Stress `operation` with the default settings
pub async fn stress<R, E, F, Fut>(operation: F) -> Result<Vec<R>, E>
where
    F: Fn(Confirmation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: From<ConfirmError> + Send + 'static,
{
    StressRunner::new().perform(operation).await
}

#[cfg(test)]
#[path = "stress_tests.rs"]
mod tests;
