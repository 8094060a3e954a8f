//! Group domains by identical mapping to surface duplicates.

use std::collections::BTreeMap;

use serde::Serialize;

use super::Entry;

/// Key shared by every symlink entry. Link targets are not compared.
pub const SYMLINK_GROUP_KEY: &str = "(symlink)";

/// Note attached to a file-mapping group with more than one domain.
pub const DUPLICATE_NOTE: &str = "duplicate mapping";

/// Domains sharing one mapping string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingGroup {
    /// The exact mapping string, or [`SYMLINK_GROUP_KEY`].
    #[serde(rename = "mapping")]
    pub key: String,
    /// Member domains, ascending.
    pub domains: Vec<String>,
    /// [`DUPLICATE_NOTE`] or empty.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub note: String,
}

impl MappingGroup {
    /// True when this group flags a duplicate mapping.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        !self.note.is_empty()
    }
}

/// Group entries by exact mapping string, sorted by key.
///
/// Unreadable file entries group under their `error:<message>` rendering.
pub fn group_by_mapping(entries: &[Entry]) -> Vec<MappingGroup> {
    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for entry in entries {
        let key = if entry.is_symlink() {
            SYMLINK_GROUP_KEY.to_string()
        } else {
            entry.payload.display()
        };
        buckets.entry(key).or_default().push(entry.domain.clone());
    }

    buckets
        .into_iter()
        .map(|(key, mut domains)| {
            domains.sort();
            let note = if key != SYMLINK_GROUP_KEY && domains.len() > 1 {
                DUPLICATE_NOTE.to_string()
            } else {
                String::new()
            };
            MappingGroup { key, domains, note }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_flagged() {
        let entries = vec![
            Entry::file("b", "3000"),
            Entry::file("a", "3000"),
            Entry::file("c", "4000"),
        ];
        let groups = group_by_mapping(&entries);
        assert_eq!(
            groups,
            vec![
                MappingGroup {
                    key: "3000".into(),
                    domains: vec!["a".into(), "b".into()],
                    note: DUPLICATE_NOTE.into(),
                },
                MappingGroup {
                    key: "4000".into(),
                    domains: vec!["c".into()],
                    note: String::new(),
                },
            ]
        );
        assert!(groups[0].is_duplicate());
        assert!(!groups[1].is_duplicate());
    }

    #[test]
    fn test_symlinks_share_one_group_without_note() {
        let entries = vec![
            Entry::symlink("x", "/srv/x"),
            Entry::symlink("y", "/srv/y"),
            Entry::file("z", "5000"),
        ];
        let groups = group_by_mapping(&entries);
        let links = groups.iter().find(|g| g.key == SYMLINK_GROUP_KEY).unwrap();
        assert_eq!(links.domains, vec!["x", "y"]);
        assert!(links.note.is_empty());
    }

    #[test]
    fn test_groups_sorted_by_key() {
        let entries = vec![
            Entry::file("a", "9000"),
            Entry::file("b", "127.0.0.1:3000"),
            Entry::symlink("c", "/srv/c"),
        ];
        let keys: Vec<String> = group_by_mapping(&entries)
            .into_iter()
            .map(|g| g.key)
            .collect();
        assert_eq!(keys, vec!["(symlink)", "127.0.0.1:3000", "9000"]);
    }

    #[test]
    fn test_group_json_shape() {
        let groups = group_by_mapping(&[Entry::file("a", "3000")]);
        let json = serde_json::to_value(&groups).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"mapping": "3000", "domains": ["a"]}])
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(group_by_mapping(&[]).is_empty());
    }
}
