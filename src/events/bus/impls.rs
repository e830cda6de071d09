use crate::events::config::EventBusConfig;

use super::core::LookupEventBus;

impl Default for LookupEventBus {
    fn default() -> Self {
        Self::with_config(EventBusConfig::default())
    }
}
