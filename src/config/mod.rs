//! Configuration for entity lookup instances
//!
//! `LookupConfig` is built with a typestate builder or loaded from JSON.

pub mod builder;
pub mod errors;
pub mod getters;
pub mod methods;
pub mod types;

pub use builder::{LookupConfigBuilder, WithComponentName};
pub use errors::ConfigError;
pub use types::{DEFAULT_COMPONENT_NAME, LookupConfig};
