// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Stubbed outbound calls for tests
//!
//! An [`Interceptor`] stands in for an external service: tests register
//! canned responses, the code under test routes its calls through
//! [`Interceptor::handle`], and every call is recorded. [`CallMonitor`]
//! pairs two interceptors with confirmations so a test can wait for an
//! expected number of calls to complete before inspecting them.

pub mod interceptor;
pub mod monitor;
pub mod storage;
pub mod stub;

pub use interceptor::{CallObserver, Interceptor, StubError};
pub use monitor::{CallMonitor, PRIMARY_CONFIRMATION, SECONDARY_CONFIRMATION};
pub use storage::{MemoryStubStorage, StubStorage};
pub use stub::{InterceptedCall, ResponseStub, StubReply};
