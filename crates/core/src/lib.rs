// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! ck-core: confirmation and stress primitives for concurrent tests
//!
//! This crate provides:
//! - Confirmations: countable signal handles shared with concurrent producers
//! - A waiter racing a timeout against confirmation completion
//! - Runners that join an operation's result with its confirmations
//! - Concurrent fan-out with randomized start jitter, async and threaded

pub mod config;
pub mod confirmation;
pub mod error;
pub mod fan_out;
pub mod guarded;
pub mod outcome;
pub mod runner;
pub mod stress;
pub mod threads;
pub mod waiter;

pub use config::{ConfigError, ConfirmConfig, HarnessConfig, StressConfig};
pub use confirmation::{Confirmable, Confirmation, Counter};
pub use error::ConfirmError;
pub use fan_out::{run_fan_out, FanOutRunner, Jitter};
pub use guarded::Guarded;
pub use outcome::RunOutcome;
pub use runner::{confirm, ConfirmationRunner};
pub use stress::{stress, StressRunner};
pub use threads::run_threads;
pub use waiter::{wait_for_confirmations, Waiter, DEFAULT_POLL_INTERVAL};
