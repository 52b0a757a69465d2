//! Configuration loading and parsing

use anyhow::{Context, Result};
use can2joy_core::{DeviceProfile, TranslatorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main application configuration (loaded from an optional config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub translator: TranslatorConfig,
    #[serde(default)]
    pub device: DeviceProfile,
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        self.translator.validate().context("Invalid [translator] section")?;
        self.device.validate().context("Invalid [device] section")?;
        Ok(())
    }
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use can2joy_core::SyncPolicy;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let toml_content = r#"
            [translator]
            sync_policy = "recognized-only"
            read_timeout_ms = 50

            [device]
            name = "Lambo wheel"
            product = 0x0001
        "#;

        let config: AppConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.translator.sync_policy, SyncPolicy::RecognizedOnly);
        assert_eq!(config.translator.read_timeout_ms, 50);
        assert_eq!(config.device.name, "Lambo wheel");
        assert_eq!(config.device.vendor, 0x1234);
        assert_eq!(config.device.product, 0x0001);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[translator]\nsync_policy = \"always\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.translator.sync_policy, SyncPolicy::Always);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[translator]\nread_timeout_ms = 0").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("read_timeout_ms"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
