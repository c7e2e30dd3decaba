// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration
//!
//! Defaults for confirmation and stress runs, optionally loaded from TOML:
//!
//! ```toml
//! [confirm]
//! timeout = "1s"
//! poll_interval = "100us"
//!
//! [stress]
//! iterations = 1000
//! max_jitter = "1us"   # "0s" disables jitter
//! timeout = "1s"
//! auto_confirm = true
//! poll_interval = "100us"
//! ```

use crate::fan_out::Jitter;
use crate::waiter::DEFAULT_POLL_INTERVAL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming a config file for [`HarnessConfig::from_env`]
pub const CONFIG_ENV: &str = "CONFIRMKIT_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level harness configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub confirm: ConfirmConfig,
    pub stress: StressConfig,
}

impl HarnessConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Load the file named by `CONFIRMKIT_CONFIG`, or defaults when unset
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => {
                tracing::debug!(path = ?path, "loading harness config");
                Self::load(PathBuf::from(path))
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Defaults for single confirmation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmConfig {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Defaults for stress runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StressConfig {
    pub iterations: usize,
    /// Upper bound of the per-invocation start delay; zero means no jitter
    #[serde(with = "humantime_serde")]
    pub max_jitter: Duration,
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    pub auto_confirm: bool,
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl StressConfig {
    pub fn jitter(&self) -> Jitter {
        Jitter::from(self.max_jitter)
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            max_jitter: Duration::from_micros(1),
            timeout: Duration::from_secs(1),
            auto_confirm: true,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
