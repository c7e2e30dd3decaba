// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Confirmations: countable signal handles
//!
//! A [`Confirmation`] is cloned into every producer that may signal it,
//! including detached tasks the operation under test never awaits. The
//! [`Waiter`](crate::waiter::Waiter) reads the shared counter rather than the
//! operation's return value.

use crate::guarded::Guarded;
use std::fmt;
use std::sync::Arc;
use tokio::sync::futures::Notified;
use tokio::sync::Notify;

/// Anything that can receive signals
///
/// Objects under test usually hold a `Confirmable` (or a closure calling one)
/// instead of a concrete [`Confirmation`].
pub trait Confirmable: Send + Sync {
    /// Record `count` signals
    fn signal_by(&self, count: usize);

    /// Record a single signal
    fn signal(&self) {
        self.signal_by(1);
    }
}

/// Monotonic signal counter
///
/// Every increment wakes tasks parked in [`Counter::changed`].
#[derive(Debug, Default)]
pub struct Counter {
    value: Guarded<usize>,
    changed: Notify,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` and return the new total
    pub fn add(&self, count: usize) -> usize {
        let total = self.value.mutate(|v| v.saturating_add(count));
        self.changed.notify_waiters();
        total
    }

    pub fn get(&self) -> usize {
        self.value.get()
    }

    /// Future resolving on the next increment
    pub fn changed(&self) -> Notified<'_> {
        self.changed.notified()
    }
}

struct Shared {
    name: String,
    expected: usize,
    counter: Counter,
}

/// A countable signal handle with an expected count
///
/// An expected count of zero makes the confirmation *inverted*: it is
/// satisfied only if no signal ever arrives.
#[derive(Clone)]
pub struct Confirmation {
    shared: Arc<Shared>,
}

impl Confirmation {
    pub fn new(expected_count: usize, name: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(Shared {
                name: name.into(),
                expected: expected_count,
                counter: Counter::new(),
            }),
        }
    }

    /// A confirmation that must never be signalled
    pub fn inverted(name: impl Into<String>) -> Self {
        Self::new(0, name)
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn expected_count(&self) -> usize {
        self.shared.expected
    }

    pub fn actual_count(&self) -> usize {
        self.shared.counter.get()
    }

    pub fn is_inverted(&self) -> bool {
        self.shared.expected == 0
    }

    /// Whether at least the expected number of signals has arrived
    pub fn completed(&self) -> bool {
        self.actual_count() >= self.shared.expected
    }

    /// Whether the current state would fail a verdict taken right now
    pub fn is_violated(&self) -> bool {
        if self.is_inverted() {
            self.actual_count() > 0
        } else {
            !self.completed()
        }
    }

    /// Future resolving on the next signal
    pub fn changed(&self) -> Notified<'_> {
        self.shared.counter.changed()
    }
}

impl Confirmable for Confirmation {
    fn signal_by(&self, count: usize) {
        let actual = self.shared.counter.add(count);
        tracing::trace!(
            name = %self.shared.name,
            actual,
            expected = self.shared.expected,
            "confirmation signalled"
        );
    }
}

impl fmt::Debug for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Confirmation")
            .field("name", &self.shared.name)
            .field("expected", &self.shared.expected)
            .field("actual", &self.actual_count())
            .finish()
    }
}

#[cfg(test)]
#[path = "confirmation_tests.rs"]
mod tests;
