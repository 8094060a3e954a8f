//! Command-line interface definitions for pumadevctl.
//!
//! Uses clap's derive API for type-safe argument parsing.

use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use std::path::PathBuf;

/// Manage puma-dev mappings.
///
/// Every file in the puma-dev directory maps a domain to `host:port`; every
/// symlink maps a domain to an application directory. pumadevctl lists,
/// creates, updates and deletes those entries, hands out free port blocks,
/// and checks which mapped services are actually listening.
#[derive(Parser, Debug)]
#[command(name = "pumadevctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding puma-dev entries (default: ~/.puma-dev).
    #[arg(short = 'd', long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Skip interactive confirmations; overwrite on create.
    #[arg(short = 'f', long = "force", global = true)]
    pub force: bool,

    /// Print JSON where supported.
    #[arg(long = "json", global = true)]
    pub json: bool,

    /// Suppress non-essential output.
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Lowest port for automatic allocation (inclusive).
    #[arg(long = "port-min", value_name = "PORT", global = true)]
    pub port_min: Option<u32>,

    /// Highest port for automatic allocation (inclusive).
    #[arg(long = "port-max", value_name = "PORT", global = true)]
    pub port_max: Option<u32>,

    /// Number of consecutive ports reserved per domain.
    #[arg(long = "port-block-size", value_name = "N", global = true)]
    pub port_block_size: Option<u32>,

    /// Path to an additional config file.
    ///
    /// Merged on top of the system and user configs. Unlike those, it must
    /// exist.
    #[arg(short = 'c', long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity.
    ///
    /// Can be specified multiple times:
    /// -v    = info level
    /// -vv   = debug level
    /// -vvv  = trace level
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    /// Parse `std::env::args`, reporting `version` for `--version`.
    ///
    /// Exits on parse errors and after printing help or version, like
    /// [`Parser::parse`].
    pub fn parse_with_version(version: String) -> Self {
        let matches = Self::command().version(version).get_matches();
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        match Self::from_arg_matches(matches) {
            Ok(cli) => cli,
            Err(e) => e.exit(),
        }
    }
}

/// Subcommands for pumadevctl.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List mappings, grouping domains that share one.
    List,

    /// Read a single mapping or symlink.
    Read {
        /// Domain (file name) to read.
        domain: String,
    },

    /// Create an entry: a mapping file, or a symlink with --link.
    ///
    /// Without a mapping, the next free port block is allocated and its base
    /// port written.
    Create {
        /// Domain (file name) to create.
        domain: String,

        /// `PORT`, `HOST:PORT` or `[IPv6]:PORT`.
        #[arg(conflicts_with = "link")]
        mapping: Option<String>,

        /// Create a symlink to this path instead of a mapping file.
        #[arg(long = "link", value_name = "PATH")]
        link: Option<String>,
    },

    /// Replace an entry's mapping, or repoint it as a symlink with --link.
    Update {
        /// Domain (file name) to update.
        domain: String,

        /// New mapping; required unless --link is set.
        #[arg(conflicts_with = "link")]
        mapping: Option<String>,

        /// Repoint the entry as a symlink to this path.
        #[arg(long = "link", value_name = "PATH")]
        link: Option<String>,
    },

    /// Delete an entry (file or symlink).
    Delete {
        /// Domain (file name) to delete.
        domain: String,
    },

    /// Check reachability of every mapping with a TCP dial.
    Validate {
        /// Dial timeout in milliseconds.
        #[arg(long = "timeout", value_name = "MS")]
        timeout: Option<u64>,
    },

    /// Remove unreachable mappings (symlinks are never removed).
    Cleanup {
        /// Dial timeout in milliseconds.
        #[arg(long = "timeout", value_name = "MS")]
        timeout: Option<u64>,

        /// Assume yes; do not prompt.
        #[arg(long = "yes")]
        yes: bool,

        /// Show what would be deleted without doing it.
        #[arg(long = "dry-run")]
        dry_run: bool,
    },

    /// Print the base port of the next free port block.
    Allocate,

    /// Check whether puma-dev is installed and running.
    Doctor {
        /// Also print raw configuration files.
        #[arg(long = "raw")]
        raw: bool,
    },

    /// Show detailed version information.
    Version,
}
