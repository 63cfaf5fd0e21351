// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bus configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! name_matching = "unified"
//! handler_failure = "log"
//! catch_panics = true
//!
//! [worker]
//! queue = "events"
//! concurrency = 4
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "HERALD_CONFIG";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How exact patterns compare against event names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    /// Text and atom names of equal spelling are distinct
    #[default]
    Strict,
    /// Only the spelling is compared
    Unified,
}

/// What happens when the error handler itself fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerFailure {
    /// Abort the announce and return the failure to the publisher
    #[default]
    Propagate,
    /// Log the failure and keep dispatching
    Log,
}

/// Background submission settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Queue name stamped on submitted jobs
    pub queue: String,
    /// Maximum jobs executing at once in the local worker
    pub concurrency: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue: "default".to_string(),
            concurrency: 1,
        }
    }
}

/// Event bus configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    pub name_matching: NameMatching,
    pub handler_failure: HandlerFailure,
    /// Convert listener panics into listener failures
    pub catch_panics: bool,
    pub worker: WorkerConfig,
}

impl Default for BusConfig {
    fn default() -> Self {
        Self {
            name_matching: NameMatching::default(),
            handler_failure: HandlerFailure::default(),
            catch_panics: true,
            worker: WorkerConfig::default(),
        }
    }
}

impl BusConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Locate and load configuration.
    ///
    /// Order: `$HERALD_CONFIG`, then `<config dir>/herald/herald.toml`,
    /// then defaults. An explicitly named file must exist.
    pub fn discover() -> Result<Self, ConfigError> {
        Self::discover_from(
            std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            Self::default_path(),
        )
    }

    fn discover_from(explicit: Option<PathBuf>, fallback: Option<PathBuf>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config from {}", CONFIG_ENV);
            return Self::load(&path);
        }

        match fallback {
            Some(path) if path.exists() => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// Per-user config file location, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("herald").join("herald.toml"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.worker.concurrency == 0 {
            return Err(ConfigError::Invalid(
                "worker.concurrency must be at least 1".to_string(),
            ));
        }
        if self.worker.queue.is_empty() {
            return Err(ConfigError::Invalid("worker.queue must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
