//! Store configuration
//!
//! Settings are plain data so they can come from code, a TOML string, or a
//! TOML file:
//!
//! ```toml
//! initial_capacity = 4096
//! max_batch_len = 512
//! transactions = true
//! command_timeout_ms = 250
//! ```
//!
//! `command_timeout_ms` is carried as-is for store implementations that
//! talk to a server; the record layer never interprets it.

use crate::error::{StoreError, StoreResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default pre-allocated key capacity
pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Configuration for a store backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Keys to pre-allocate room for
    pub initial_capacity: usize,
    /// Reject batches with more commands than this
    pub max_batch_len: Option<usize>,
    /// Accept transaction batches
    pub transactions: bool,
    /// Per-round-trip timeout, passed through to the client
    pub command_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_batch_len: None,
            transactions: true,
            command_timeout_ms: None,
        }
    }
}

impl StoreConfig {
    /// Default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pre-allocated key capacity
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Limit the number of commands per batch
    pub fn max_batch_len(mut self, max: usize) -> Self {
        self.max_batch_len = Some(max);
        self
    }

    /// Enable or disable transaction batches
    pub fn transactions(mut self, enabled: bool) -> Self {
        self.transactions = enabled;
        self
    }

    /// Set the round-trip timeout
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Round-trip timeout, if configured
    pub fn timeout(&self) -> Option<Duration> {
        self.command_timeout_ms.map(Duration::from_millis)
    }

    /// Parse from a TOML document
    pub fn from_toml_str(source: &str) -> StoreResult<Self> {
        let config: StoreConfig =
            toml::from_str(source).map_err(|e| StoreError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> StoreResult<()> {
        if self.max_batch_len == Some(0) {
            return Err(StoreError::Config(
                "max_batch_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
