// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmation runner
//!
//! Drives one operation concurrently with a [`Waiter`] over a fresh
//! [`Confirmation`] and returns the operation's value only once the
//! confirmation is satisfied. Signals may come from detached tasks the
//! operation spawned and never awaited; the waiter stays open for them.
//!
//! ```ignore
//! let value = ConfirmationRunner::new()
//!     .with_expected_count(2)
//!     .with_timeout(Duration::from_secs(1))
//!     .perform(|confirmation| async move {
//!         let root = Root::new(confirmation);
//!         root.run().await?;
//!         Ok::<_, MyError>("done")
//!     })
//!     .await?;
//! ```

use crate::config::ConfirmConfig;
use crate::confirmation::Confirmation;
use crate::error::ConfirmError;
use crate::outcome::RunOutcome;
use crate::waiter::Waiter;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::Instrument;

/// Runs an operation against a confirmation with a deadline
#[derive(Debug, Clone)]
pub struct ConfirmationRunner {
    name: String,
    expected_count: usize,
    timeout: Duration,
    poll_interval: Duration,
}

impl ConfirmationRunner {
    /// One expected signal, empty name, one second timeout
    pub fn new() -> Self {
        Self::from_config(&ConfirmConfig::default())
    }

    pub fn from_config(config: &ConfirmConfig) -> Self {
        Self {
            name: String::new(),
            expected_count: 1,
            timeout: config.timeout,
            poll_interval: config.poll_interval,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Zero makes the confirmation inverted
    pub fn with_expected_count(mut self, expected_count: usize) -> Self {
        self.expected_count = expected_count;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `operation` and wait for its confirmation
    ///
    /// An error from the operation is returned as soon as it happens. A
    /// timeout from the waiter is returned as soon as it happens, dropping the
    /// operation. Once the confirmation is satisfied the operation gets one
    /// more `timeout` window to produce its value before the run fails with
    /// [`ConfirmError::NoResult`].
    pub async fn perform<R, E, F, Fut>(&self, operation: F) -> Result<R, E>
    where
        F: FnOnce(Confirmation) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<ConfirmError>,
    {
        let span = tracing::info_span!(
            "confirm",
            name = %self.name,
            expected = self.expected_count,
            timeout_ms = self.timeout.as_millis() as u64,
        );
        self.run(operation).instrument(span).await
    }

    async fn run<R, E, F, Fut>(&self, operation: F) -> Result<R, E>
    where
        F: FnOnce(Confirmation) -> Fut,
        Fut: Future<Output = Result<R, E>>,
        E: From<ConfirmError>,
    {
        let confirmation = Confirmation::new(self.expected_count, self.name.clone());
        let waiter = Waiter::new(vec![confirmation.clone()], self.timeout)
            .with_poll_interval(self.poll_interval);

        let operation = operation(confirmation);
        tokio::pin!(operation);
        let wait = waiter.wait();
        tokio::pin!(wait);

        let mut outcome = RunOutcome::Pending;
        let mut operation_done = false;
        let mut wait_done = false;
        // Set once the confirmation is satisfied; `None` never fires
        let mut settle_by: Option<Instant> = None;

        while !(operation_done && wait_done) {
            tokio::select! {
                result = &mut operation, if !operation_done => {
                    operation_done = true;
                    match result {
                        Ok(value) => outcome = outcome.with_value(value),
                        Err(e) => {
                            tracing::debug!("operation failed before confirmation settled");
                            return Err(e);
                        }
                    }
                }
                verdict = &mut wait, if !wait_done => {
                    wait_done = true;
                    verdict?;
                    outcome = outcome.with_confirmed();
                    settle_by = Instant::now().checked_add(self.timeout);
                }
                _ = settle(settle_by), if wait_done && !operation_done => {
                    tracing::warn!("confirmation satisfied but operation produced no value");
                    break;
                }
            }
        }

        outcome.into_result().map_err(E::from)
    }
}

// A deadline beyond the clock's range never fires
async fn settle(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

impl Default for ConfirmationRunner {
    fn default() -> Self {
        Self::new()
    }
}

/// Run `operation` with one expected signal and a one second timeout
pub async fn confirm<R, E, F, Fut>(operation: F) -> Result<R, E>
where
    F: FnOnce(Confirmation) -> Fut,
    Fut: Future<Output = Result<R, E>>,
    E: From<ConfirmError>,
{
    ConfirmationRunner::new().perform(operation).await
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
