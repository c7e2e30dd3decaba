// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory stub storage

use super::{take_stub, StubStorage};
use crate::stub::{InterceptedCall, ResponseStub};
use async_trait::async_trait;
use ck_core::Guarded;

/// Stub storage held in process memory; clones share the same state
#[derive(Clone, Debug, Default)]
pub struct MemoryStubStorage {
    stubs: Guarded<Vec<ResponseStub>>,
    calls: Guarded<Vec<InterceptedCall>>,
}

impl MemoryStubStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StubStorage for MemoryStubStorage {
    async fn push_stub(&self, stub: ResponseStub) {
        self.stubs.with(|stubs| stubs.push(stub));
    }

    async fn stubs(&self) -> Vec<ResponseStub> {
        self.stubs.get()
    }

    async fn set_stubs(&self, stubs: Vec<ResponseStub>) {
        self.stubs.replace(stubs);
    }

    async fn next_stub(&self, call: &InterceptedCall) -> Option<ResponseStub> {
        self.stubs.with(|stubs| take_stub(stubs, &call.target))
    }

    async fn record(&self, call: InterceptedCall) {
        self.calls.with(|calls| calls.push(call));
    }

    async fn calls(&self) -> Vec<InterceptedCall> {
        self.calls.get()
    }

    async fn set_calls(&self, calls: Vec<InterceptedCall>) {
        self.calls.replace(calls);
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
