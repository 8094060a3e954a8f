//! puma-dev installation diagnostics.
//!
//! Finds the `puma-dev` binary, asks it for its version, checks whether it
//! answers on its usual ports, and summarizes the service and config files
//! that control it. Nothing here is required for managing mappings.

mod summary;

pub use summary::{
    launchd_plist, summarize_config_file, systemd_service, top_level_yaml, Setting,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;

use crate::reach::tcp_reachable;

/// Where to read about installing puma-dev.
pub const INSTALL_URL: &str = "https://github.com/puma/puma-dev?tab=readme-ov-file#installation";

/// Ports puma-dev commonly listens on, in probe order.
pub const PROBE_PORTS: [u16; 3] = [9280, 80, 9292];

/// Dial timeout for each probe port.
pub const PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// A discovered config or service file.
#[derive(Debug, Clone)]
pub struct ConfigFileReport {
    /// Where the file lives.
    pub path: PathBuf,
    /// File body, or the read error.
    pub contents: Result<String, String>,
    /// Extracted settings; empty when unknown or unreadable.
    pub summary: Vec<Setting>,
}

/// Everything `doctor` found.
#[derive(Debug, Clone)]
pub struct DoctorReport {
    /// Path of the `puma-dev` binary, if on `PATH`.
    pub binary: Option<PathBuf>,
    /// Output of `puma-dev -V`.
    pub version: Option<String>,
    /// First probe port that accepted a connection.
    pub running_port: Option<u16>,
    /// Config and service files that exist.
    pub config_files: Vec<ConfigFileReport>,
}

impl DoctorReport {
    /// True when the binary was found.
    #[must_use]
    pub fn installed(&self) -> bool {
        self.binary.is_some()
    }
}

/// Run every check. When the binary is missing, nothing else is probed.
pub async fn diagnose(home: &Path) -> DoctorReport {
    let binary = which::which("puma-dev").ok();
    let Some(ref bin) = binary else {
        debug!("puma-dev not found on PATH");
        return DoctorReport {
            binary: None,
            version: None,
            running_port: None,
            config_files: Vec::new(),
        };
    };

    let version = binary_version(bin);
    let running_port = running_port(PROBE_TIMEOUT).await;
    let config_files = candidate_config_files(std::env::consts::OS, home)
        .into_iter()
        .filter(|p| p.is_file())
        .map(|path| read_config_file(&path))
        .collect();

    DoctorReport {
        binary,
        version,
        running_port,
        config_files,
    }
}

/// Best-effort `puma-dev -V`.
fn binary_version(bin: &Path) -> Option<String> {
    let output = Command::new(bin)
        .arg("-V")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .map_err(|e| debug!("Failed to run {:?} -V: {}", bin, e))
        .ok()?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!version.is_empty()).then_some(version)
}

/// First of [`PROBE_PORTS`] answering on loopback.
pub async fn running_port(timeout: Duration) -> Option<u16> {
    for port in PROBE_PORTS {
        if tcp_reachable("127.0.0.1", port, timeout).await {
            return Some(port);
        }
    }
    None
}

/// Likely config and service file locations for `os`, existing or not.
pub fn candidate_config_files(os: &str, home: &Path) -> Vec<PathBuf> {
    let state_dir = home.join(".puma-dev");
    match os {
        "macos" => {
            let mut paths = vec![
                home.join("Library/LaunchAgents/io.puma.dev.plist"),
                PathBuf::from("/Library/LaunchAgents/io.puma.dev.plist"),
            ];
            if state_dir.is_dir() {
                paths.push(state_dir.join("config.yml"));
                paths.push(state_dir.join("log/puma-dev.log"));
            }
            paths
        }
        "linux" => vec![
            home.join(".config/systemd/user/puma-dev.service"),
            PathBuf::from("/etc/systemd/system/puma-dev.service"),
            state_dir.join("config.yml"),
        ],
        _ => vec![state_dir.join("config.yml")],
    }
}

fn read_config_file(path: &Path) -> ConfigFileReport {
    match fs::read_to_string(path) {
        Ok(contents) => ConfigFileReport {
            path: path.to_path_buf(),
            summary: summarize_config_file(path, &contents),
            contents: Ok(contents),
        },
        Err(e) => ConfigFileReport {
            path: path.to_path_buf(),
            contents: Err(e.to_string()),
            summary: Vec::new(),
        },
    }
}
