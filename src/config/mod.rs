//! Configuration system for pumadevctl.
//!
//! TOML configuration is loaded from several layers and merged in order:
//!
//! 1. Built-in defaults
//! 2. System config: `/etc/pumadevctl/config.toml`
//! 3. User config: `$XDG_CONFIG_HOME/pumadevctl/config.toml`
//! 4. Additional config file (via `--config`)
//! 5. CLI flags (highest priority)
//!
//! ```toml
//! [general]
//! dir = "~/.puma-dev"
//!
//! [ports]
//! min = 36000
//! max = 37000
//! block_size = 10
//!
//! [validation]
//! timeout_ms = 500
//! concurrency = 16
//! ```

mod error;
mod loader;
mod schema;

pub use error::ConfigError;
pub use loader::{resolve_dir, ConfigLoader, SYSTEM_CONFIG_PATH};
pub use schema::{
    Config, GeneralConfig, PortsConfig, ValidationConfig, DEFAULT_CONCURRENCY, DEFAULT_DIR_NAME,
    DEFAULT_PORT_BLOCK_SIZE, DEFAULT_PORT_MAX, DEFAULT_PORT_MIN, DEFAULT_TIMEOUT_MS,
};
