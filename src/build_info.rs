//! Build metadata.
//!
//! Commit and date are baked in at compile time from the
//! `PUMADEVCTL_COMMIT` and `PUMADEVCTL_BUILD_DATE` environment variables when
//! they are set. The value is created once in `main` and handed to whoever
//! needs it.

use std::fmt::Write as _;

/// Version, commit and build date of this binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Semver of the release.
    pub version: String,
    /// Short git commit, when known.
    pub commit: Option<String>,
    /// Build timestamp (UTC, ISO-8601), when known.
    pub date: Option<String>,
}

impl BuildInfo {
    /// Metadata of the running binary.
    #[must_use]
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: option_env!("PUMADEVCTL_COMMIT")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            date: option_env!("PUMADEVCTL_BUILD_DATE")
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        }
    }

    /// One line: `0.4.0 (abc123, 2025-10-20T04:21:00Z, linux/x86_64)`.
    #[must_use]
    pub fn summary(&self) -> String {
        let meta: Vec<&str> = [self.commit.as_deref(), self.date.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let platform = platform();
        if meta.is_empty() {
            format!("{} ({})", self.version, platform)
        } else {
            format!("{} ({}, {})", self.version, meta.join(", "), platform)
        }
    }

    /// Multi-line form for the `version` subcommand.
    #[must_use]
    pub fn long(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "version: {}", self.version);
        let _ = writeln!(out, "commit:  {}", self.commit.as_deref().unwrap_or("-"));
        let _ = writeln!(out, "date:    {}", self.date.as_deref().unwrap_or("-"));
        let _ = write!(out, "target:  {}", platform());
        out
    }
}

fn platform() -> String {
    format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH)
}
