// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Timeout-versus-completion race over a set of confirmations
//!
//! Two branches race under `tokio::select!`:
//! - the timeout branch sleeps for the full timeout, then takes a verdict
//! - the completion branch parks on the confirmations and resolves as soon as
//!   every non-inverted confirmation is completed, or an inverted one is
//!   signalled
//!
//! The losing branch is dropped. A set made only of inverted confirmations
//! can never complete early, so it always waits out the full timeout.

use crate::confirmation::Confirmation;
use crate::error::ConfirmError;
use std::time::Duration;
use tokio::time::Instant;

/// Default interval between completion checks when no signal wakes the waiter
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(100);

/// Waits for a set of confirmations to be satisfied within a timeout
#[derive(Debug, Clone)]
pub struct Waiter {
    confirmations: Vec<Confirmation>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Waiter {
    pub fn new(confirmations: Vec<Confirmation>, timeout: Duration) -> Self {
        Self {
            confirmations,
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn confirmations(&self) -> &[Confirmation] {
        &self.confirmations
    }

    /// Resolve once, with success or the first violated confirmation
    pub async fn wait(&self) -> Result<(), ConfirmError> {
        let started = Instant::now();
        let result = tokio::select! {
            result = self.until_completed() => result,
            _ = tokio::time::sleep(self.timeout) => self.verdict(),
        };

        match &result {
            Ok(()) => tracing::debug!(
                confirmations = self.confirmations.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "confirmations satisfied"
            ),
            Err(e) => tracing::warn!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "confirmations not satisfied"
            ),
        }

        result
    }

    // An all-inverted set must wait out the timeout; an empty one is settled at once
    fn can_complete_early(&self) -> bool {
        self.confirmations.is_empty() || self.confirmations.iter().any(|c| !c.is_inverted())
    }

    /// Verdict at the moment of the call
    fn verdict(&self) -> Result<(), ConfirmError> {
        match self.confirmations.iter().find(|c| c.is_violated()) {
            Some(c) => Err(ConfirmError::Timeout {
                name: c.name().to_string(),
                expected: c.expected_count(),
                actual: c.actual_count(),
            }),
            None => Ok(()),
        }
    }

    /// Resolves when the set is settled early; pending forever otherwise
    async fn until_completed(&self) -> Result<(), ConfirmError> {
        let early = self.can_complete_early();
        loop {
            // Register for wake-ups before re-checking so no signal slips between
            let changed = self
                .confirmations
                .iter()
                .find(|c| !c.is_inverted() && !c.completed())
                .map(|c| c.changed());

            if self
                .confirmations
                .iter()
                .any(|c| c.is_inverted() && c.is_violated())
            {
                return self.verdict();
            }
            if early
                && self
                    .confirmations
                    .iter()
                    .all(|c| c.is_inverted() || c.completed())
            {
                return Ok(());
            }

            match changed {
                Some(changed) => {
                    tokio::select! {
                        _ = changed => {}
                        _ = tokio::time::sleep(self.poll_interval) => {}
                    }
                }
                None => tokio::time::sleep(self.poll_interval).await,
            }
        }
    }
}

/// Wait for `confirmations` to be satisfied within `timeout`
pub async fn wait_for_confirmations(
    confirmations: &[Confirmation],
    timeout: Duration,
) -> Result<(), ConfirmError> {
    Waiter::new(confirmations.to_vec(), timeout).wait().await
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
