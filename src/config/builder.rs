//! Builder for `RegulatorConfig`

use anyhow::Result;

use super::types::RegulatorConfig;

#[derive(Debug, Clone, Default)]
pub struct RegulatorConfigBuilder {
    pub(crate) event_capacity: Option<usize>,
    pub(crate) lease_extension_ms: Option<u64>,
}

impl RegulatorConfigBuilder {
    #[must_use]
    pub fn event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = Some(capacity);
        self
    }

    #[must_use]
    pub fn lease_extension_ms(mut self, extension_ms: u64) -> Self {
        self.lease_extension_ms = Some(extension_ms);
        self
    }

    #[must_use]
    pub fn lease_extension(self, extension: std::time::Duration) -> Self {
        self.lease_extension_ms(u64::try_from(extension.as_millis()).unwrap_or(u64::MAX))
    }

    /// Build the configuration, applying defaults for unset fields
    ///
    /// # Errors
    ///
    /// Returns an error if `event_capacity` is zero.
    pub fn build(self) -> Result<RegulatorConfig> {
        let defaults = RegulatorConfig::default();
        let config = RegulatorConfig {
            event_capacity: self.event_capacity.unwrap_or(defaults.event_capacity),
            lease_extension_ms: self
                .lease_extension_ms
                .unwrap_or(defaults.lease_extension_ms),
        };
        config.validate()?;
        Ok(config)
    }
}
