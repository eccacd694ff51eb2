//! System configuration.

use crate::dispatcher::DEFAULT_API_PREFIX;
use serde::{Deserialize, Serialize};

/// Tunables for a [`ResourceSystem`](crate::lifecycle::ResourceSystem).
///
/// Deserializable so it can be embedded in an application's own config file;
/// every field has a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Path prefix of every request, e.g. `/qfx-api/v1`.
    pub api_prefix: String,
    /// Capacity of the store actor's request channel.
    pub store_buffer: usize,
    /// Capacity of the signal broadcast channel. Slow subscribers that fall
    /// further behind than this miss signals.
    pub signal_capacity: usize,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            store_buffer: 32,
            signal_capacity: 64,
        }
    }
}

impl SystemConfig {
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    pub fn with_store_buffer(mut self, size: usize) -> Self {
        self.store_buffer = size;
        self
    }

    pub fn with_signal_capacity(mut self, capacity: usize) -> Self {
        self.signal_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SystemConfig = serde_json::from_str(r#"{ "store_buffer": 4 }"#).unwrap();
        assert_eq!(config.store_buffer, 4);
        assert_eq!(config.api_prefix, "/qfx-api/v1");
        assert_eq!(config.signal_capacity, 64);
    }
}
