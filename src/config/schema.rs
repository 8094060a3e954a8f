//! Configuration schema definitions.
//!
//! Every field is optional in a file. A zero or empty value means "not set"
//! and never overrides a lower layer during [`Config::merge`].

use serde::{Deserialize, Serialize};

/// Name of the mappings directory under the home directory.
pub const DEFAULT_DIR_NAME: &str = ".puma-dev";

/// Default lowest port for automatic allocation.
pub const DEFAULT_PORT_MIN: u32 = 36000;

/// Default highest port for automatic allocation.
pub const DEFAULT_PORT_MAX: u32 = 37000;

/// Default number of ports reserved per domain.
pub const DEFAULT_PORT_BLOCK_SIZE: u32 = 10;

/// Default TCP dial timeout for validation, in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Default number of probes in flight.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Top-level configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Automatic port allocation.
    #[serde(default)]
    pub ports: PortsConfig,

    /// Reachability validation.
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl Config {
    /// Built-in defaults, the bottom layer of every load.
    ///
    /// The mappings directory stays empty here; it is derived from the home
    /// directory when resolved.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            general: GeneralConfig::default(),
            ports: PortsConfig {
                min: DEFAULT_PORT_MIN,
                max: DEFAULT_PORT_MAX,
                block_size: DEFAULT_PORT_BLOCK_SIZE,
            },
            validation: ValidationConfig {
                timeout_ms: DEFAULT_TIMEOUT_MS,
                concurrency: DEFAULT_CONCURRENCY,
            },
        }
    }

    /// Merge another config into this one. Set values in `other` win.
    pub fn merge(&mut self, other: Config) {
        self.general.merge(other.general);
        self.ports.merge(other.ports);
        self.validation.merge(other.validation);
    }
}

/// General application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Mappings directory. A leading `~` is expanded.
    #[serde(default)]
    pub dir: String,
}

impl GeneralConfig {
    fn merge(&mut self, other: GeneralConfig) {
        if !other.dir.is_empty() {
            self.dir = other.dir;
        }
    }
}

/// Port allocation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PortsConfig {
    /// Lowest port (inclusive).
    #[serde(default)]
    pub min: u32,

    /// Highest port (inclusive).
    #[serde(default)]
    pub max: u32,

    /// Consecutive ports reserved per domain.
    #[serde(default)]
    pub block_size: u32,
}

impl PortsConfig {
    fn merge(&mut self, other: PortsConfig) {
        if other.min != 0 {
            self.min = other.min;
        }
        if other.max != 0 {
            self.max = other.max;
        }
        if other.block_size != 0 {
            self.block_size = other.block_size;
        }
    }
}

/// Validation settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidationConfig {
    /// TCP dial timeout in milliseconds.
    #[serde(default)]
    pub timeout_ms: u64,

    /// Maximum probes in flight.
    #[serde(default)]
    pub concurrency: usize,
}

impl ValidationConfig {
    fn merge(&mut self, other: ValidationConfig) {
        if other.timeout_ms != 0 {
            self.timeout_ms = other.timeout_ms;
        }
        if other.concurrency != 0 {
            self.concurrency = other.concurrency;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let config = Config::builtin();
        assert_eq!(config.ports.min, 36000);
        assert_eq!(config.ports.max, 37000);
        assert_eq!(config.ports.block_size, 10);
        assert_eq!(config.validation.timeout_ms, 500);
        assert!(config.general.dir.is_empty());
    }

    #[test]
    fn test_unset_values_do_not_override() {
        let mut config = Config::builtin();
        let partial: Config = toml::from_str(
            r#"
            [ports]
            max = 36500
            "#,
        )
        .unwrap();
        config.merge(partial);

        assert_eq!(config.ports.min, 36000);
        assert_eq!(config.ports.max, 36500);
        assert_eq!(config.ports.block_size, 10);
        assert_eq!(config.validation.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn test_later_layer_wins() {
        let mut config = Config::builtin();
        config.merge(toml::from_str("[general]\ndir = \"/a\"").unwrap());
        config.merge(toml::from_str("[general]\ndir = \"/b\"").unwrap());
        assert_eq!(config.general.dir, "/b");
    }

    #[test]
    fn test_empty_file_parses() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
