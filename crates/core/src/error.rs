// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for confirmation runs

use thiserror::Error;

/// Errors produced by the harness itself
///
/// Runners are generic over the caller's error type `E: From<ConfirmError>`:
/// these variants convert into `E`, while the operation's own errors pass
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmError {
    /// A confirmation was not satisfied when the timeout elapsed, or an
    /// inverted confirmation was signalled.
    #[error(
        "timeout waiting for confirmation: {name}. expected count: {expected}, actual count: {actual}"
    )]
    Timeout {
        name: String,
        expected: usize,
        actual: usize,
    },
    /// The confirmation was satisfied but the operation never produced a value
    #[error("operation produced no result")]
    NoResult,
    /// The operation produced a value but the confirmation was never satisfied
    #[error("operation produced a result without confirmation")]
    NoResultNoConfirmation,
    /// A fan-out task was cancelled by the runtime before finishing
    #[error("fan-out task was cancelled")]
    TaskCancelled,
}

impl ConfirmError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ConfirmError::Timeout { .. })
    }
}
