// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waits for an expected number of intercepted calls
//!
//! A [`CallMonitor`] owns two independent interceptors, primary and
//! secondary. Observing one of them wires a confirmation to its observer so
//! each completed call signals once; reading the calls then waits for every
//! observed interceptor to reach its count.

use crate::interceptor::Interceptor;
use crate::storage::MemoryStubStorage;
use crate::stub::{InterceptedCall, ResponseStub};
use ck_core::{ConfirmConfig, ConfirmError, Confirmable, Confirmation, Guarded, Waiter};
use std::time::Duration;

pub const PRIMARY_CONFIRMATION: &str = "Primary Calls Confirmation";
pub const SECONDARY_CONFIRMATION: &str = "Secondary Calls Confirmation";

#[derive(Debug, Clone)]
pub struct CallMonitor {
    primary: Interceptor<MemoryStubStorage>,
    secondary: Interceptor<MemoryStubStorage>,
    primary_confirmation: Guarded<Option<Confirmation>>,
    secondary_confirmation: Guarded<Option<Confirmation>>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Default for CallMonitor {
    fn default() -> Self {
        Self::from_config(&ConfirmConfig::default())
    }
}

impl CallMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ConfirmConfig) -> Self {
        Self {
            primary: Interceptor::new(MemoryStubStorage::new()),
            secondary: Interceptor::new(MemoryStubStorage::new()),
            primary_confirmation: Guarded::new(None),
            secondary_confirmation: Guarded::new(None),
            timeout: config.timeout,
            poll_interval: config.poll_interval,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn primary(&self) -> &Interceptor<MemoryStubStorage> {
        &self.primary
    }

    pub fn secondary(&self) -> &Interceptor<MemoryStubStorage> {
        &self.secondary
    }

    /// Expect `count` completed calls on the primary interceptor
    pub fn observe_primary(&self, count: usize) {
        observe(&self.primary, &self.primary_confirmation, count, PRIMARY_CONFIRMATION);
    }

    /// Expect `count` completed calls on the secondary interceptor
    pub fn observe_secondary(&self, count: usize) {
        observe(
            &self.secondary,
            &self.secondary_confirmation,
            count,
            SECONDARY_CONFIRMATION,
        );
    }

    pub async fn add_primary_stubs(&self, stubs: impl IntoIterator<Item = ResponseStub>) {
        for stub in stubs {
            self.primary.register(stub).await;
        }
    }

    pub async fn add_secondary_stubs(&self, stubs: impl IntoIterator<Item = ResponseStub>) {
        for stub in stubs {
            self.secondary.register(stub).await;
        }
    }

    /// Primary calls, once every observed count is reached
    pub async fn primary_calls(&self) -> Result<Vec<InterceptedCall>, ConfirmError> {
        self.wait().await?;
        Ok(self.primary.calls().await)
    }

    /// Secondary calls, once every observed count is reached
    pub async fn secondary_calls(&self) -> Result<Vec<InterceptedCall>, ConfirmError> {
        self.wait().await?;
        Ok(self.secondary.calls().await)
    }

    pub async fn primary_targets(&self) -> Result<Vec<String>, ConfirmError> {
        let calls = self.primary_calls().await?;
        Ok(calls.into_iter().map(|c| c.target).collect())
    }

    pub async fn secondary_targets(&self) -> Result<Vec<String>, ConfirmError> {
        let calls = self.secondary_calls().await?;
        Ok(calls.into_iter().map(|c| c.target).collect())
    }

    /// Forget primary stubs and calls, keeping the observation
    pub async fn clear_primary_calls(&self) {
        self.primary.clear_calls().await;
    }

    /// Reset both interceptors and drop all observations
    pub async fn reset(&self) {
        self.primary.clear().await;
        self.secondary.clear().await;
        self.primary_confirmation.replace(None);
        self.secondary_confirmation.replace(None);
    }

    async fn wait(&self) -> Result<(), ConfirmError> {
        let confirmations: Vec<Confirmation> = [
            self.primary_confirmation.get(),
            self.secondary_confirmation.get(),
        ]
        .into_iter()
        .flatten()
        .collect();

        Waiter::new(confirmations, self.timeout)
            .with_poll_interval(self.poll_interval)
            .wait()
            .await
    }
}

fn observe(
    interceptor: &Interceptor<MemoryStubStorage>,
    slot: &Guarded<Option<Confirmation>>,
    count: usize,
    name: &str,
) {
    let confirmation = Confirmation::new(count, name);
    let signaller = confirmation.clone();
    interceptor.set_observer(move |_| signaller.signal());
    slot.replace(Some(confirmation));
    tracing::debug!(name, count, "observing calls");
}

#[cfg(test)]
#[path = "monitor_tests.rs"]
mod tests;
