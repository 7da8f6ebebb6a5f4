//! Path manipulation utilities for string-based navigation paths.
//!
//! The navigation core works with absolute paths as plain strings because the
//! registry ledger, prefix matching and alias rewriting are all string
//! operations. This module centralizes the conversions: tilde expansion,
//! alias-prefix rewriting, separator normalization for prefix tests, and the
//! basename/parent/relative helpers used to derive display labels.

use std::collections::BTreeMap;
use std::path::Path;

/// Expands a leading tilde to the given home directory.
///
/// Only a leading `~` is rewritten; tildes elsewhere in the path are left
/// untouched, as are paths that are already absolute.
///
/// # Examples
///
/// ```
/// use trailhead::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/projects", "/home/user"), "/home/user/projects");
/// assert_eq!(expand_tilde("~", "/home/user"), "/home/user");
/// assert_eq!(expand_tilde("/absolute/path", "/home/user"), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else if path == "~" {
        home.to_string()
    } else {
        path.to_string()
    }
}

/// Rewrites a path through the configured alias mappings.
///
/// Aliases are prefix substitutions (symlink-style: `/data` might really live
/// under `/mnt/volume/data`). Longer aliases are tried first so a nested alias
/// wins over its parent, matches respect component boundaries, and at most one
/// alias is applied per call.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use trailhead::infrastructure::apply_aliases;
///
/// let mut aliases = BTreeMap::new();
/// aliases.insert("/data".to_string(), "/mnt/volume/data".to_string());
///
/// assert_eq!(apply_aliases("/data/repo/file.rs", &aliases), "/mnt/volume/data/repo/file.rs");
/// // Component boundary: "/database" is not under the "/data" alias.
/// assert_eq!(apply_aliases("/database/file.rs", &aliases), "/database/file.rs");
/// ```
#[must_use]
pub fn apply_aliases(path: &str, aliases: &BTreeMap<String, String>) -> String {
    let mut ordered: Vec<(&String, &String)> = aliases.iter().collect();
    ordered.sort_by_key(|(alias, _)| std::cmp::Reverse(alias.len()));

    for (alias, target) in ordered {
        if path == alias {
            return target.clone();
        }
        if let Some(rest) = path.strip_prefix(&ensure_trailing_sep(alias)) {
            return format!("{}{rest}", ensure_trailing_sep(target));
        }
    }
    path.to_string()
}

/// Returns the path with exactly one trailing separator.
///
/// Used before prefix tests so that `/path/to/dir` does not match
/// `/path/to/dir_other/file`.
///
/// # Examples
///
/// ```
/// use trailhead::infrastructure::ensure_trailing_sep;
///
/// assert_eq!(ensure_trailing_sep("/path/to/dir"), "/path/to/dir/");
/// assert_eq!(ensure_trailing_sep("/path/to/dir/"), "/path/to/dir/");
/// ```
#[must_use]
pub fn ensure_trailing_sep(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

/// Returns the final component of a path, or the path itself when it has none
/// (the filesystem root).
#[must_use]
pub fn basename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map_or_else(|| path.to_string(), |name| name.to_string_lossy().into_owned())
}

/// Returns the parent directory, or `None` at the filesystem root.
#[must_use]
pub fn parent(path: &str) -> Option<String> {
    Path::new(path)
        .parent()
        .map(|dir| dir.to_string_lossy().into_owned())
}

/// Joins a directory and an entry name.
#[must_use]
pub fn join(dir: &str, name: &str) -> String {
    Path::new(dir).join(name).to_string_lossy().into_owned()
}

/// Returns `path` relative to `root`, or `path` unchanged when it does not
/// live under `root`.
#[must_use]
pub fn relative_to(root: &str, path: &str) -> String {
    Path::new(path)
        .strip_prefix(root)
        .map_or_else(|_| path.to_string(), |rel| rel.to_string_lossy().into_owned())
}

/// Whether the path is absolute on this platform.
#[must_use]
pub fn is_absolute(path: &str) -> bool {
    Path::new(path).is_absolute()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde("~/a/b", "/home/u"), "/home/u/a/b");
        assert_eq!(expand_tilde("~", "/home/u"), "/home/u");
        assert_eq!(expand_tilde("/a/~/b", "/home/u"), "/a/~/b");
    }

    #[test]
    fn alias_respects_component_boundary() {
        let mut aliases = BTreeMap::new();
        aliases.insert("/data".to_string(), "/mnt/data".to_string());

        assert_eq!(apply_aliases("/data", &aliases), "/mnt/data");
        assert_eq!(apply_aliases("/data/x", &aliases), "/mnt/data/x");
        assert_eq!(apply_aliases("/database/x", &aliases), "/database/x");
    }

    #[test]
    fn longest_alias_wins() {
        let mut aliases = BTreeMap::new();
        aliases.insert("/a".to_string(), "/short".to_string());
        aliases.insert("/a/b".to_string(), "/long".to_string());

        assert_eq!(apply_aliases("/a/b/c", &aliases), "/long/c");
        assert_eq!(apply_aliases("/a/x", &aliases), "/short/x");
    }

    #[test]
    fn path_components() {
        assert_eq!(basename("/a/b/c.rs"), "c.rs");
        assert_eq!(basename("/"), "/");
        assert_eq!(parent("/a/b"), Some("/a".to_string()));
        assert_eq!(parent("/a"), Some("/".to_string()));
        assert_eq!(parent("/"), None);
        assert_eq!(relative_to("/a/b", "/a/b/c/d.rs"), "c/d.rs");
        assert_eq!(join("/a/b", "c"), "/a/b/c");
    }
}
