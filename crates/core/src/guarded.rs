// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Lock-protected shared values
//!
//! `Guarded<T>` is the one primitive used wherever several concurrent writers
//! mutate the same state: confirmation counters, observer slots, call logs.
//! Clones share the same underlying value.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A shared value with atomic read and read-modify-write
pub struct Guarded<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Guarded<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(value)),
        }
    }

    // A panic while holding the lock leaves the value intact, so poisoning is ignored
    fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the value with `update(current)` and return the new value
    pub fn mutate(&self, update: impl FnOnce(&T) -> T) -> T
    where
        T: Clone,
    {
        let mut guard = self.lock();
        *guard = update(&guard);
        guard.clone()
    }

    /// Run `f` with exclusive access to the value
    pub fn with<U>(&self, f: impl FnOnce(&mut T) -> U) -> U {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// Overwrite the value, returning the previous one
    pub fn replace(&self, value: T) -> T {
        std::mem::replace(&mut *self.lock(), value)
    }
}

impl<T: Clone> Guarded<T> {
    /// Snapshot of the current value
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}

impl<T> Clone for Guarded<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for Guarded<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Guarded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guarded").field(&*self.lock()).finish()
    }
}

#[cfg(test)]
#[path = "guarded_tests.rs"]
mod tests;
