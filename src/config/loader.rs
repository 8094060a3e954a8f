//! Configuration loading with hierarchy merging.
//!
//! Configuration is loaded from multiple sources and merged in order:
//!
//! 1. Built-in defaults
//! 2. System config: `/etc/pumadevctl/config.toml`
//! 3. User config: `~/.config/pumadevctl/config.toml`
//! 4. Additional config file (via `--config` flag)
//! 5. CLI flags (highest priority)

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::error::ConfigError;
use super::schema::{Config, DEFAULT_DIR_NAME};
use crate::cli::Cli;

/// System-wide configuration path.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/pumadevctl/config.toml";

/// User configuration directory name.
pub const USER_CONFIG_DIR: &str = "pumadevctl";

/// User configuration filename.
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Configuration loader with support for hierarchy merging.
pub struct ConfigLoader {
    /// Path to system-wide configuration.
    system_path: PathBuf,
    /// Path to user configuration.
    user_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new ConfigLoader with default paths.
    #[must_use]
    pub fn new() -> Self {
        let user_config_dir = dirs::config_dir()
            .map(|p| p.join(USER_CONFIG_DIR))
            .unwrap_or_else(|| PathBuf::from(".config").join(USER_CONFIG_DIR));

        Self {
            system_path: PathBuf::from(SYSTEM_CONFIG_PATH),
            user_path: user_config_dir.join(USER_CONFIG_FILE),
        }
    }

    /// Create a ConfigLoader with custom paths (for testing).
    #[must_use]
    pub fn with_paths(system_path: PathBuf, user_path: PathBuf) -> Self {
        Self {
            system_path,
            user_path,
        }
    }

    /// Load and merge configuration from all sources.
    ///
    /// Missing system and user files are skipped. A missing `--config` file
    /// and invalid TOML anywhere are errors.
    pub fn load(&self, cli: &Cli) -> Result<Config, ConfigError> {
        let mut config = Config::builtin();

        for path in [&self.system_path, &self.user_path] {
            if let Some(file_config) = self.load_file(path)? {
                config.merge(file_config);
                debug!("Loaded config from {:?}", path);
            } else {
                debug!("No config found at {:?}", path);
            }
        }

        if let Some(ref cli_config_path) = cli.config {
            match self.load_file(cli_config_path)? {
                Some(cli_config) => {
                    config.merge(cli_config);
                    debug!("Loaded additional config from {:?}", cli_config_path);
                }
                None => {
                    return Err(ConfigError::ReadError {
                        path: cli_config_path.clone(),
                        source: std::io::Error::new(
                            std::io::ErrorKind::NotFound,
                            "Specified config file not found",
                        ),
                    });
                }
            }
        }

        apply_cli_overrides(&mut config, cli);
        Ok(config)
    }

    /// Load a config file, returning None if it doesn't exist.
    fn load_file(&self, path: &PathBuf) -> Result<Option<Config>, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => {
                let config: Config =
                    toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                        path: path.clone(),
                        source: e,
                    })?;
                Ok(Some(config))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ConfigError::ReadError {
                path: path.clone(),
                source: e,
            }),
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(ref dir) = cli.dir {
        config.general.dir = dir.to_string_lossy().into_owned();
    }
    if let Some(min) = cli.port_min {
        config.ports.min = min;
    }
    if let Some(max) = cli.port_max {
        config.ports.max = max;
    }
    if let Some(block_size) = cli.port_block_size {
        config.ports.block_size = block_size;
    }
}

/// Resolve the mappings directory chosen by `config` to an absolute path.
///
/// An empty setting means `~/.puma-dev`. Fails when the path does not exist
/// or is not a directory.
pub fn resolve_dir(config: &Config) -> Result<PathBuf, ConfigError> {
    let dir = if config.general.dir.is_empty() {
        dirs::home_dir()
            .ok_or(ConfigError::NoHomeDirectory)?
            .join(DEFAULT_DIR_NAME)
    } else {
        expand_home(&config.general.dir)?
    };

    let abs = std::path::absolute(&dir).map_err(|e| ConfigError::ReadError {
        path: dir.clone(),
        source: e,
    })?;
    match fs::metadata(&abs) {
        Ok(meta) if meta.is_dir() => Ok(abs),
        Ok(_) => Err(ConfigError::NotADirectory(abs)),
        Err(_) => Err(ConfigError::DirectoryMissing(abs)),
    }
}

fn expand_home(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return dirs::home_dir().ok_or(ConfigError::NoHomeDirectory);
    }
    match path.strip_prefix("~/") {
        Some(rest) => Ok(dirs::home_dir()
            .ok_or(ConfigError::NoHomeDirectory)?
            .join(rest)),
        None => Ok(PathBuf::from(path)),
    }
}
