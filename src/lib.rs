//! pumadevctl: a manager for puma-dev domain mappings.
//!
//! puma-dev routes `*.test` domains by looking at a directory (normally
//! `~/.puma-dev`). Each regular file there maps its name to `host:port` or a
//! bare port; each symlink maps its name to an application directory. This
//! crate treats that directory as a small key/value store.
//!
//! # Architecture
//!
//! - **Entries**: the directory store, mapping parser and duplicate grouping
//! - **Ports**: block allocation in a configured port range
//! - **Reach**: concurrent TCP reachability checks and cleanup of dead entries
//! - **Config**: layered TOML configuration with CLI overrides
//! - **Doctor**: diagnostics for the puma-dev installation itself
//! - **Output**: colored console lines and JSON

#![warn(clippy::all)]
#![warn(missing_docs)]

pub mod build_info;
pub mod cli;
pub mod cli_handler;
pub mod config;
pub mod doctor;
pub mod entries;
pub mod error;
pub mod output;
pub mod ports;
pub mod reach;
