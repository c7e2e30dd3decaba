// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome state machine joining an operation's value with its confirmation
//!
//! Terminal failures (timeout, operation error) never enter this machine;
//! runners return them directly as `Err`.

use crate::error::ConfirmError;

/// Progress of a confirmation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome<R> {
    /// Neither the value nor the confirmation is known
    Pending,
    /// The operation produced a value; confirmation not yet verified
    Value(R),
    /// The confirmation is satisfied; value not yet available
    Confirmed,
    /// Both halves are known
    ConfirmedValue(R),
}

impl<R> RunOutcome<R> {
    /// Combine two partial outcomes
    ///
    /// Merging is commutative for the halves that complete each other. Any
    /// other combination keeps `self`.
    pub fn merge(self, other: Self) -> Self {
        match (self, other) {
            (RunOutcome::Pending, other) => other,
            (RunOutcome::Value(value), RunOutcome::Confirmed)
            | (RunOutcome::Confirmed, RunOutcome::Value(value)) => RunOutcome::ConfirmedValue(value),
            (current, _) => current,
        }
    }

    /// Record the operation's value
    pub fn with_value(self, value: R) -> Self {
        self.merge(RunOutcome::Value(value))
    }

    /// Record that the confirmation was satisfied
    pub fn with_confirmed(self) -> Self {
        self.merge(RunOutcome::Confirmed)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, RunOutcome::ConfirmedValue(_))
    }

    /// Final result; anything short of `ConfirmedValue` is an error
    pub fn into_result(self) -> Result<R, ConfirmError> {
        match self {
            RunOutcome::ConfirmedValue(value) => Ok(value),
            RunOutcome::Value(_) => Err(ConfirmError::NoResultNoConfirmation),
            RunOutcome::Pending | RunOutcome::Confirmed => Err(ConfirmError::NoResult),
        }
    }
}

impl<R> Default for RunOutcome<R> {
    fn default() -> Self {
        RunOutcome::Pending
    }
}
