//! The mappings namespace.
//!
//! A puma-dev directory is a flat namespace: every regular file is a
//! `host:port` mapping named after its domain, every symbolic link points at
//! an application directory. This module holds the entry model, the mapping
//! parser, the directory-backed store, and duplicate grouping.
//!
//! The directory is the only source of truth. Nothing here caches entries
//! between calls; each operation re-reads what it needs.

mod error;
mod group;
mod mapping;
mod store;

pub use error::{MappingError, StoreError, StoreResult};
pub use group::{group_by_mapping, MappingGroup, DUPLICATE_NOTE, SYMLINK_GROUP_KEY};
pub use mapping::{parse_mapping, Mapping, DEFAULT_HOST};
pub use store::EntryStore;

use serde::ser::{Serialize, SerializeStruct, Serializer};

/// What kind of filesystem node backs an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file whose trimmed content is a mapping string.
    FileMapping,
    /// Symbolic link to an application directory.
    Symlink,
}

/// Content of an entry's node, or the reason it could not be read.
///
/// Listing never aborts on one bad node; the failure travels as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Mapping string (file) or link target (symlink).
    Value(String),
    /// Reading the content or link target failed.
    ReadError(String),
}

impl Payload {
    /// Rendered form: the value itself, or `error:<message>`.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Payload::Value(v) => v.clone(),
            Payload::ReadError(msg) => format!("error:{msg}"),
        }
    }
}

/// One record of the namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// File name, unique within the directory.
    pub domain: String,
    /// Node kind.
    pub kind: EntryKind,
    /// Mapping string or link target.
    pub payload: Payload,
}

impl Entry {
    /// A plain-file entry holding `mapping`.
    pub fn file(domain: impl Into<String>, mapping: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            kind: EntryKind::FileMapping,
            payload: Payload::Value(mapping.into()),
        }
    }

    /// A symlink entry pointing at `target`.
    pub fn symlink(domain: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            kind: EntryKind::Symlink,
            payload: Payload::Value(target.into()),
        }
    }

    /// True for symlink entries.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// The raw mapping string of a readable file entry.
    #[must_use]
    pub fn mapping(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (EntryKind::FileMapping, Payload::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// The link target of a readable symlink entry.
    #[must_use]
    pub fn link_target(&self) -> Option<&str> {
        match (&self.kind, &self.payload) {
            (EntryKind::Symlink, Payload::Value(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Parse the mapping of a file entry.
    ///
    /// An unreadable file fails with the read error folded into a malformed
    /// mapping, so callers can report it the same way as bad content.
    pub fn parsed_mapping(&self) -> Result<Mapping, MappingError> {
        match &self.payload {
            Payload::Value(v) => Mapping::parse(v),
            Payload::ReadError(_) => Err(MappingError::Malformed {
                input: self.payload.display(),
                reason: "entry could not be read",
            }),
        }
    }
}

// Wire shape: {"domain", "mapping", "is_symlink", "link_target"?}
impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let symlink = self.is_symlink();
        let mut state = serializer.serialize_struct("Entry", if symlink { 4 } else { 3 })?;
        state.serialize_field("domain", &self.domain)?;
        if symlink {
            state.serialize_field("mapping", "")?;
            state.serialize_field("is_symlink", &true)?;
            state.serialize_field("link_target", &self.payload.display())?;
        } else {
            state.serialize_field("mapping", &self.payload.display())?;
            state.serialize_field("is_symlink", &false)?;
            state.skip_field("link_target")?;
        }
        state.end()
    }
}
