// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage for registered stubs and recorded calls

mod memory;

pub use memory::MemoryStubStorage;

use crate::stub::{InterceptedCall, ResponseStub};
use async_trait::async_trait;

/// Backing store shared by an interceptor and the test driving it
#[async_trait]
pub trait StubStorage: Clone + Send + Sync + 'static {
    /// Register a stub behind those already queued
    async fn push_stub(&self, stub: ResponseStub);

    async fn stubs(&self) -> Vec<ResponseStub>;

    async fn set_stubs(&self, stubs: Vec<ResponseStub>);

    /// Remove and return the stub that answers `call`
    async fn next_stub(&self, call: &InterceptedCall) -> Option<ResponseStub>;

    /// Append `call` to the call log
    async fn record(&self, call: InterceptedCall);

    async fn calls(&self) -> Vec<InterceptedCall>;

    async fn set_calls(&self, calls: Vec<InterceptedCall>);
}

/// Take the stub answering `target` out of `stubs`
///
/// Preference order: an exact target match, then the first wildcard, then
/// whichever stub was registered first.
pub fn take_stub(stubs: &mut Vec<ResponseStub>, target: &str) -> Option<ResponseStub> {
    let position = stubs
        .iter()
        .position(|s| s.target.as_deref() == Some(target))
        .or_else(|| stubs.iter().position(ResponseStub::is_wildcard));

    match position {
        Some(index) => Some(stubs.remove(index)),
        None if stubs.is_empty() => None,
        None => Some(stubs.remove(0)),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
