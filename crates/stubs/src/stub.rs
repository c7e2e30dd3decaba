// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Canned responses and recorded calls

use std::time::Duration;

/// A canned response served to one intercepted call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseStub {
    /// Target this stub answers; `None` answers any target
    pub target: Option<String>,
    pub status: u16,
    pub body: Option<Vec<u8>>,
    /// When set, the call fails with this message instead of replying
    pub error: Option<String>,
    pub delay: Duration,
    /// When set, the call never completes
    pub hang: bool,
}

impl Default for ResponseStub {
    fn default() -> Self {
        Self {
            target: None,
            status: 200,
            body: None,
            error: None,
            delay: Duration::ZERO,
            hang: false,
        }
    }
}

impl ResponseStub {
    pub fn new() -> Self {
        Self::default()
    }

    /// A stub answering only calls to `target`
    pub fn for_target(target: impl Into<String>) -> Self {
        Self::default().with_target(target)
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_hang(mut self, hang: bool) -> Self {
        self.hang = hang;
        self
    }

    /// Whether this stub answers any target
    pub fn is_wildcard(&self) -> bool {
        self.target.is_none()
    }
}

/// A call routed through an interceptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterceptedCall {
    pub target: String,
    pub body: Vec<u8>,
}

impl InterceptedCall {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            body: Vec::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// The reply produced from a matched stub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubReply {
    pub status: u16,
    pub body: Vec<u8>,
}
