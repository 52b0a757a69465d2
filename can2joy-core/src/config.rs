//! Translator configuration types
//!
//! The defaults reproduce the reference behavior exactly; every field can be
//! overridden from the application's config file.

use crate::types::{Result, TranslateError};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// When to emit the trailing synchronization event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncPolicy {
    /// After every frame, including frames with an unknown identifier
    #[default]
    Always,
    /// Only after frames that produced button or axis events
    RecognizedOnly,
}

/// Configuration for the translation loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslatorConfig {
    /// Trailing sync behavior for unrecognized frames
    #[serde(default)]
    pub sync_policy: SyncPolicy,

    /// How long a transport read may block before the loop re-checks for
    /// shutdown (default: 100ms)
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: u64,
}

fn default_read_timeout() -> u64 {
    100
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            sync_policy: SyncPolicy::default(),
            read_timeout_ms: default_read_timeout(),
        }
    }
}

impl TranslatorConfig {
    /// Create a new translator configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the sync policy
    pub fn with_sync_policy(mut self, policy: SyncPolicy) -> Self {
        self.sync_policy = policy;
        self
    }

    /// Builder method: set the transport read timeout
    pub fn with_read_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.read_timeout_ms = timeout_ms;
        self
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }

    /// Reject values the transport cannot work with
    pub fn validate(&self) -> Result<()> {
        // A zero timeout means "block forever" to the socket layer, which
        // would make shutdown unobservable.
        if self.read_timeout_ms == 0 {
            return Err(TranslateError::Config(
                "read_timeout_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translator_config_builder() {
        let config = TranslatorConfig::new()
            .with_sync_policy(SyncPolicy::RecognizedOnly)
            .with_read_timeout_ms(250);

        assert_eq!(config.sync_policy, SyncPolicy::RecognizedOnly);
        assert_eq!(config.read_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = TranslatorConfig::default();
        assert_eq!(config.sync_policy, SyncPolicy::Always);
        assert_eq!(config.read_timeout_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = TranslatorConfig::new().with_read_timeout_ms(0);
        assert!(matches!(config.validate(), Err(TranslateError::Config(_))));
    }

    #[test]
    fn test_config_deserialization() {
        let config: TranslatorConfig = toml::from_str(r#"sync_policy = "recognized-only""#).unwrap();
        assert_eq!(config.sync_policy, SyncPolicy::RecognizedOnly);
        assert_eq!(config.read_timeout_ms, 100);

        let config: TranslatorConfig = toml::from_str("").unwrap();
        assert_eq!(config, TranslatorConfig::default());
    }
}
