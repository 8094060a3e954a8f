//! Summaries of puma-dev service and config files.
//!
//! These are deliberately shallow readers: they pull out the handful of
//! settings worth showing and ignore everything else.

use std::collections::BTreeMap;
use std::path::Path;

/// One summarized setting.
pub type Setting = (String, String);

/// Summarize a file by its extension. Unknown types yield nothing.
pub fn summarize_config_file(path: &Path, content: &str) -> Vec<Setting> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "yml" | "yaml" => top_level_yaml(content).into_iter().collect(),
        "service" => systemd_service(content),
        "plist" => launchd_plist(content),
        _ => Vec::new(),
    }
}

/// Top-level `key: value` pairs of a YAML document, sorted by key.
///
/// Indented (nested) keys, comments, and keys without a scalar value are
/// skipped. Surrounding quotes and trailing ` #` comments are removed.
pub fn top_level_yaml(content: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if line.starts_with([' ', '\t']) {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let mut value = value.trim();
        if let Some(idx) = value.find(" #") {
            value = value[..idx].trim();
        }
        let value = value.trim_matches(|c| c == '\'' || c == '"');
        if !key.is_empty() && !value.is_empty() {
            out.insert(key.to_string(), value.to_string());
        }
    }
    out
}

/// `ExecStart`, `Environment` and `User` from a unit's `[Service]` section.
pub fn systemd_service(content: &str) -> Vec<Setting> {
    let mut out = Vec::new();
    let mut in_service = false;
    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            in_service = line == "[Service]";
            continue;
        }
        if !in_service {
            continue;
        }
        for (prefix, key) in [("ExecStart=", "exec"), ("Environment=", "environment"), ("User=", "user")] {
            if let Some(value) = line.strip_prefix(prefix) {
                out.push((key.to_string(), value.to_string()));
            }
        }
    }
    out
}

/// `Label`, `ProgramArguments`, `KeepAlive` and `RunAtLoad` from a launchd plist.
pub fn launchd_plist(content: &str) -> Vec<Setting> {
    let mut out = Vec::new();
    if let Some(label) = plist_string(content, "Label").filter(|s| !s.is_empty()) {
        out.push(("label".to_string(), label.to_string()));
    }
    let args = plist_string_array(content, "ProgramArguments");
    if !args.is_empty() {
        out.push(("args".to_string(), args.join(" ")));
    }
    if plist_true(content, "KeepAlive") {
        out.push(("keepalive".to_string(), "true".to_string()));
    }
    if plist_true(content, "RunAtLoad") {
        out.push(("run_at_load".to_string(), "true".to_string()));
    }
    out
}

fn after_key<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("<key>{key}</key>");
    content.find(&marker).map(|idx| &content[idx + marker.len()..])
}

fn plist_string<'a>(content: &'a str, key: &str) -> Option<&'a str> {
    let rest = after_key(content, key)?;
    let open = rest.find("<string>")? + "<string>".len();
    let close = rest[open..].find("</string>")?;
    Some(&rest[open..open + close])
}

fn plist_string_array<'a>(content: &'a str, key: &str) -> Vec<&'a str> {
    let Some(rest) = after_key(content, key) else {
        return Vec::new();
    };
    let (Some(start), Some(end)) = (rest.find("<array>"), rest.find("</array>")) else {
        return Vec::new();
    };
    if end <= start {
        return Vec::new();
    }
    let mut array = &rest[start + "<array>".len()..end];
    let mut values = Vec::new();
    while let Some(open) = array.find("<string>") {
        let body = &array[open + "<string>".len()..];
        let Some(close) = body.find("</string>") else {
            break;
        };
        values.push(&body[..close]);
        array = &body[close + "</string>".len()..];
    }
    values
}

// Only looks for a `<true/>` anywhere after the key, like launchctl's own
// plists would have it.
fn plist_true(content: &str, key: &str) -> bool {
    after_key(content, key).is_some_and(|rest| rest.contains("<true/>"))
}
