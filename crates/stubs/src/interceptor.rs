// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Routes calls to registered stubs and records them

use crate::storage::StubStorage;
use crate::stub::{InterceptedCall, ResponseStub, StubReply};
use ck_core::Guarded;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned to the code under test by an intercepted call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StubError {
    #[error("injected failure for {target}: {message}")]
    Injected { target: String, message: String },
    #[error("no stub registered for {0}")]
    Unmatched(String),
}

/// Invoked each time an intercepted call completes
pub type CallObserver = Arc<dyn Fn(&InterceptedCall) + Send + Sync>;

/// Stand-in for an external service
///
/// Clones share storage and observer, so a test can keep one handle while the
/// code under test holds another.
#[derive(Clone)]
pub struct Interceptor<S> {
    storage: S,
    observer: Guarded<Option<CallObserver>>,
}

impl<S: StubStorage> Interceptor<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            observer: Guarded::new(None),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn register(&self, stub: ResponseStub) {
        tracing::debug!(target_path = ?stub.target, status = stub.status, "stub registered");
        self.storage.push_stub(stub).await;
    }

    /// Run `observer` after every completed call, replacing any previous one
    pub fn set_observer(&self, observer: impl Fn(&InterceptedCall) + Send + Sync + 'static) {
        self.observer.replace(Some(Arc::new(observer)));
    }

    pub fn clear_observer(&self) {
        self.observer.replace(None);
    }

    pub async fn calls(&self) -> Vec<InterceptedCall> {
        self.storage.calls().await
    }

    /// Drop registered stubs and recorded calls
    pub async fn clear_calls(&self) {
        self.storage.set_stubs(Vec::new()).await;
        self.storage.set_calls(Vec::new()).await;
    }

    /// Drop stubs, calls and the observer
    pub async fn clear(&self) {
        self.clear_calls().await;
        self.clear_observer();
    }

    /// Answer `call` from the registered stubs
    ///
    /// The call is recorded before a stub is chosen. A stub's delay is slept
    /// before replying, and a hanging stub never completes. The observer runs
    /// once the reply or failure is ready.
    pub async fn handle(&self, call: InterceptedCall) -> Result<StubReply, StubError> {
        self.storage.record(call.clone()).await;

        let result = match self.storage.next_stub(&call).await {
            Some(stub) => {
                tracing::debug!(
                    target_path = %call.target,
                    status = stub.status,
                    delay_ms = stub.delay.as_millis() as u64,
                    "intercepted call"
                );
                if !stub.delay.is_zero() {
                    tokio::time::sleep(stub.delay).await;
                }
                if stub.hang {
                    tracing::debug!(target_path = %call.target, "stub hangs");
                    std::future::pending::<()>().await;
                }
                match stub.error {
                    Some(message) => Err(StubError::Injected {
                        target: call.target.clone(),
                        message,
                    }),
                    None => Ok(StubReply {
                        status: stub.status,
                        body: stub.body.unwrap_or_default(),
                    }),
                }
            }
            None => {
                tracing::warn!(target_path = %call.target, "no stub registered");
                Err(StubError::Unmatched(call.target.clone()))
            }
        };

        let observer = self.observer.with(|o| o.clone());
        if let Some(observer) = observer {
            observer(&call);
        }
        result
    }
}

impl<S: fmt::Debug> fmt::Debug for Interceptor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("storage", &self.storage)
            .field("observed", &self.observer.with(|o| o.is_some()))
            .finish()
    }
}

#[cfg(test)]
#[path = "interceptor_tests.rs"]
mod tests;
