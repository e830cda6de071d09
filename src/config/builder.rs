//! Type-safe builder for `LookupConfig` using the typestate pattern
//!
//! A component name must be supplied before `build` becomes available.

use std::marker::PhantomData;

use super::errors::ConfigError;
use super::types::LookupConfig;

// Type states for the builder
pub struct WithComponentName;

pub struct LookupConfigBuilder<State = ()> {
    pub(crate) draft: LookupConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for LookupConfigBuilder<()> {
    fn default() -> Self {
        Self {
            draft: LookupConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl LookupConfig {
    #[must_use]
    pub fn builder() -> LookupConfigBuilder<()> {
        LookupConfigBuilder::default()
    }
}

impl LookupConfigBuilder<()> {
    pub fn component_name(
        mut self,
        name: impl Into<String>,
    ) -> LookupConfigBuilder<WithComponentName> {
        self.draft.component_name = name.into();
        LookupConfigBuilder {
            draft: self.draft,
            _phantom: PhantomData,
        }
    }
}

impl LookupConfig {
    /// Reopen a finished configuration for further overrides
    #[must_use]
    pub fn into_builder(self) -> LookupConfigBuilder<WithComponentName> {
        LookupConfigBuilder {
            draft: self,
            _phantom: PhantomData,
        }
    }
}

impl LookupConfigBuilder<WithComponentName> {
    pub fn build(self) -> Result<LookupConfig, ConfigError> {
        let mut config = self.draft;
        config.component_name = config.component_name.trim().to_string();
        config.validate()?;
        Ok(config)
    }
}
