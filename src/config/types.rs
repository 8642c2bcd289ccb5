//! Core configuration types for the activity regulator

use serde::{Deserialize, Serialize};

use crate::utils::constants::{DEFAULT_EVENT_CAPACITY, DEFAULT_LEASE_EXTENSION_MS};

use super::builder::RegulatorConfigBuilder;

/// Tunables for [`ActivityRegulator`](crate::regulator::ActivityRegulator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatorConfig {
    /// Buffered events per subscriber before the oldest are dropped.
    ///
    /// **INVARIANT:** At least 1 (checked by the builder and `from_json`).
    pub(crate) event_capacity: usize,

    /// Milliseconds added to a live lease by a renewal
    pub(crate) lease_extension_ms: u64,
}

impl Default for RegulatorConfig {
    fn default() -> Self {
        Self {
            event_capacity: DEFAULT_EVENT_CAPACITY,
            lease_extension_ms: DEFAULT_LEASE_EXTENSION_MS,
        }
    }
}

impl RegulatorConfig {
    #[must_use]
    pub fn builder() -> RegulatorConfigBuilder {
        RegulatorConfigBuilder::default()
    }

    /// Parse a configuration from JSON, filling absent fields with defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> anyhow::Result<()> {
        if self.event_capacity == 0 {
            anyhow::bail!("event_capacity must be at least 1");
        }
        Ok(())
    }

    #[must_use]
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    #[must_use]
    pub fn lease_extension_ms(&self) -> u64 {
        self.lease_extension_ms
    }
}
