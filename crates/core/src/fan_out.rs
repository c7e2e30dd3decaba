// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concurrent fan-out with randomized start jitter
//!
//! Every invocation runs as its own tokio task. The first error aborts all
//! siblings still sleeping or running and becomes the overall result.

use crate::error::ConfirmError;
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinSet};

/// Start delay policy for fan-out invocations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Jitter {
    /// Start immediately, for maximum contention
    None,
    /// Uniform random delay in `[0, max]`, sampled per invocation
    Uniform(Duration),
}

impl Jitter {
    /// Draw one start delay
    pub fn sample(&self) -> Duration {
        match self {
            Jitter::None => Duration::ZERO,
            Jitter::Uniform(max) if max.is_zero() => Duration::ZERO,
            Jitter::Uniform(max) => {
                let max_nanos = u64::try_from(max.as_nanos()).unwrap_or(u64::MAX);
                Duration::from_nanos(rand::rng().random_range(0..=max_nanos))
            }
        }
    }

    pub fn max_delay(&self) -> Duration {
        match self {
            Jitter::None => Duration::ZERO,
            Jitter::Uniform(max) => *max,
        }
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Jitter::Uniform(Duration::from_micros(1))
    }
}

impl From<Duration> for Jitter {
    fn from(max: Duration) -> Self {
        if max.is_zero() {
            Jitter::None
        } else {
            Jitter::Uniform(max)
        }
    }
}

/// Launches `count` concurrent invocations of an operation
#[derive(Debug, Clone, Copy)]
pub struct FanOutRunner {
    count: usize,
    jitter: Jitter,
}

impl FanOutRunner {
    pub fn new(count: usize, jitter: Jitter) -> Self {
        Self { count, jitter }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn jitter(&self) -> Jitter {
        self.jitter
    }

    /// Run all invocations and collect their values in completion order
    pub async fn run<R, E, F, Fut>(&self, operation: F) -> Result<Vec<R>, E>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<R, E>> + Send + 'static,
        R: Send + 'static,
        E: From<ConfirmError> + Send + 'static,
    {
        let operation = Arc::new(operation);
        let mut tasks = JoinSet::new();
        for _ in 0..self.count {
            let operation = Arc::clone(&operation);
            let delay = self.jitter.sample();
            tasks.spawn(async move {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                operation().await
            });
        }

        let mut results = Vec::with_capacity(self.count);
        while let Some(joined) = tasks.join_next().await {
            match joined.map_err(join_failure::<E>)? {
                Ok(value) => results.push(value),
                Err(e) => {
                    tracing::warn!(
                        completed = results.len(),
                        remaining = tasks.len(),
                        "fan-out invocation failed, aborting siblings"
                    );
                    tasks.abort_all();
                    return Err(e);
                }
            }
        }

        tracing::debug!(count = self.count, "fan-out complete");
        Ok(results)
    }
}

// Panics are resumed on the caller so test failures keep their message.
// Cancellation only comes from the runtime (e.g. shutdown); the runner's own
// `abort_all` happens after it has stopped joining.
fn join_failure<E: From<ConfirmError>>(err: JoinError) -> E {
    match err.try_into_panic() {
        Ok(payload) => std::panic::resume_unwind(payload),
        Err(_) => E::from(ConfirmError::TaskCancelled),
    }
}

/// Run `count` concurrent invocations of `operation` with start jitter
pub async fn run_fan_out<R, E, F, Fut>(
    count: usize,
    jitter: Jitter,
    operation: F,
) -> Result<Vec<R>, E>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R, E>> + Send + 'static,
    R: Send + 'static,
    E: From<ConfirmError> + Send + 'static,
{
    FanOutRunner::new(count, jitter).run(operation).await
}

#[cfg(test)]
#[path = "fan_out_tests.rs"]
mod tests;
