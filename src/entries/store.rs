//! Directory-backed entry store.
//!
//! The store is a thin, non-retrying wrapper over the filesystem. Every call
//! goes to disk; there is no index, cache, or journal.
//!
//! Creation without overwrite is exclusive at the OS level (`O_EXCL` for
//! files, `symlink(2)` refusing an existing path for links), so two
//! concurrent creates of the same domain cannot both succeed. Overwrites are
//! last-writer-wins.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::error::{StoreError, StoreResult};
use super::{Entry, EntryKind, Payload};

/// A mappings directory.
#[derive(Debug, Clone)]
pub struct EntryStore {
    dir: PathBuf,
}

impl EntryStore {
    /// Open a store over `dir`. The directory is not touched until an
    /// operation runs.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// List every entry, sorted by domain.
    ///
    /// Subdirectories are skipped. A node whose content or link target
    /// cannot be read is still listed, with a [`Payload::ReadError`].
    pub fn list(&self) -> StoreResult<Vec<Entry>> {
        let items = fs::read_dir(&self.dir).map_err(|e| self.io(&self.dir, e))?;

        let mut entries = Vec::new();
        for item in items {
            let item = item.map_err(|e| self.io(&self.dir, e))?;
            let Ok(domain) = item.file_name().into_string() else {
                warn!("Skipping non UTF-8 file name in {:?}", self.dir);
                continue;
            };
            let path = item.path();
            let meta = match fs::symlink_metadata(&path) {
                Ok(meta) => meta,
                Err(e) => {
                    // Removed between readdir and lstat.
                    debug!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };
            if meta.is_dir() {
                continue;
            }
            let entry = if meta.file_type().is_symlink() {
                Entry {
                    domain,
                    kind: EntryKind::Symlink,
                    payload: read_link_payload(&path),
                }
            } else {
                let payload = match fs::read(&path) {
                    Ok(bytes) => Payload::Value(trimmed(&bytes)),
                    Err(e) => {
                        warn!("Failed to read mapping {:?}: {}", path, e);
                        Payload::ReadError(e.to_string())
                    }
                };
                Entry {
                    domain,
                    kind: EntryKind::FileMapping,
                    payload,
                }
            };
            entries.push(entry);
        }

        entries.sort_by(|a, b| a.domain.cmp(&b.domain));
        debug!("Listed {} entries in {:?}", entries.len(), self.dir);
        Ok(entries)
    }

    /// Read a single entry.
    ///
    /// Fails with [`StoreError::NotFound`] when no node (or only a
    /// subdirectory) exists under that name. An unreadable link target is
    /// reported in the payload; an unreadable file is an error.
    pub fn read(&self, domain: &str) -> StoreResult<Entry> {
        let path = self.node_path(domain)?;
        let meta = fs::symlink_metadata(&path).map_err(|e| self.classify(domain, &path, e))?;

        if meta.file_type().is_symlink() {
            return Ok(Entry {
                domain: domain.to_string(),
                kind: EntryKind::Symlink,
                payload: read_link_payload(&path),
            });
        }
        if meta.is_dir() {
            return Err(StoreError::NotFound(domain.to_string()));
        }

        let bytes = fs::read(&path).map_err(|e| self.classify(domain, &path, e))?;
        Ok(Entry::file(domain, trimmed(&bytes)))
    }

    /// Write a plain-file mapping.
    ///
    /// Without `overwrite` the file is created exclusively and an occupied
    /// name fails with [`StoreError::AlreadyExists`]. With `overwrite` an
    /// existing symlink is replaced by a file. The content is written
    /// verbatim, without a trailing newline.
    pub fn write(&self, domain: &str, mapping: &str, overwrite: bool) -> StoreResult<()> {
        let path = self.node_path(domain)?;

        if overwrite {
            if is_symlink(&path) {
                fs::remove_file(&path).map_err(|e| self.classify(domain, &path, e))?;
            }
            fs::write(&path, mapping).map_err(|e| self.classify(domain, &path, e))?;
        } else {
            let mut file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .map_err(|e| self.classify(domain, &path, e))?;
            file.write_all(mapping.as_bytes())
                .map_err(|e| self.classify(domain, &path, e))?;
        }

        info!("Wrote {} -> {}", domain, mapping);
        Ok(())
    }

    /// Create a symlink entry pointing at `target`.
    ///
    /// The target is stored verbatim and may not resolve. With `overwrite`
    /// any existing node is removed first on a best-effort basis; if that
    /// fails, link creation reports the problem.
    pub fn create_symlink(&self, domain: &str, target: &str, overwrite: bool) -> StoreResult<()> {
        let path = self.node_path(domain)?;

        if overwrite && let Err(e) = fs::remove_file(&path) {
            debug!("Pre-create removal of {:?} failed: {}", path, e);
        }
        make_symlink(target, &path).map_err(|e| self.classify(domain, &path, e))?;

        info!("Linked {} -> {}", domain, target);
        Ok(())
    }

    /// Replace a mapping unconditionally, creating the file if absent.
    pub fn update(&self, domain: &str, mapping: &str) -> StoreResult<()> {
        self.write(domain, mapping, true)
    }

    /// Repoint an existing entry as a symlink to `target`.
    ///
    /// Fails with [`StoreError::NotFound`] when nothing exists at `domain`.
    pub fn update_symlink(&self, domain: &str, target: &str) -> StoreResult<()> {
        let path = self.node_path(domain)?;
        fs::remove_file(&path).map_err(|e| self.classify(domain, &path, e))?;
        make_symlink(target, &path).map_err(|e| self.classify(domain, &path, e))?;

        info!("Relinked {} -> {}", domain, target);
        Ok(())
    }

    /// Remove an entry. A subdirectory is not an entry and reports
    /// [`StoreError::NotFound`], as in [`EntryStore::read`].
    pub fn delete(&self, domain: &str) -> StoreResult<()> {
        let path = self.node_path(domain)?;
        let meta = fs::symlink_metadata(&path).map_err(|e| self.classify(domain, &path, e))?;
        if meta.is_dir() {
            return Err(StoreError::NotFound(domain.to_string()));
        }
        fs::remove_file(&path).map_err(|e| self.classify(domain, &path, e))?;

        info!("Deleted {}", domain);
        Ok(())
    }

    /// Path of the node for `domain`, rejecting names that would escape the
    /// directory or name it.
    fn node_path(&self, domain: &str) -> StoreResult<PathBuf> {
        let invalid = domain.is_empty()
            || domain == "."
            || domain == ".."
            || domain.contains('/')
            || domain.contains(std::path::MAIN_SEPARATOR)
            || domain.contains('\0');
        if invalid {
            return Err(StoreError::InvalidDomain(domain.to_string()));
        }
        Ok(self.dir.join(domain))
    }

    fn classify(&self, domain: &str, path: &Path, e: std::io::Error) -> StoreError {
        match e.kind() {
            ErrorKind::NotFound => StoreError::NotFound(domain.to_string()),
            ErrorKind::AlreadyExists => StoreError::AlreadyExists(domain.to_string()),
            _ => self.io(path, e),
        }
    }

    fn io(&self, path: &Path, e: std::io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }
    }
}

fn trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim().to_string()
}

fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

fn read_link_payload(path: &Path) -> Payload {
    match fs::read_link(path) {
        Ok(target) => Payload::Value(target.to_string_lossy().into_owned()),
        Err(e) => {
            warn!("Failed to read link {:?}: {}", path, e);
            Payload::ReadError(e.to_string())
        }
    }
}

#[cfg(unix)]
fn make_symlink(target: &str, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_symlink(_target: &str, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        ErrorKind::Unsupported,
        "symlink entries require a unix filesystem",
    ))
}
