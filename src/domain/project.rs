//! Project entry domain model.
//!
//! This module defines [`ProjectEntry`], the value stored against each project
//! name in the registry. An entry carries the absolute root directory plus a
//! session-local access timestamp used for display; only the root is ever
//! persisted, so entries restored from disk start with no timestamp.

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// A known project: an absolute root directory with access metadata.
///
/// Entries live in the project registry keyed by project name (the directory
/// basename by default). The registry's recency order, not this struct, decides
/// ranking; `last_accessed` exists so host UIs can show a "when" next to each
/// project and is never written to the ledger.
///
/// # Fields
///
/// - `root`: Absolute filesystem path to the project directory
/// - `last_accessed`: Unix timestamp of the most recent access this session,
///   `None` for entries restored from disk that have not been touched yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub root: String,
    pub last_accessed: Option<i64>,
}

impl ProjectEntry {
    /// Creates an entry for a project accessed right now.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead::ProjectEntry;
    ///
    /// let entry = ProjectEntry::new("/home/user/code/myproject".to_string());
    /// assert_eq!(entry.root, "/home/user/code/myproject");
    /// assert!(entry.last_accessed.is_some());
    /// ```
    #[must_use]
    pub fn new(root: String) -> Self {
        Self {
            root,
            last_accessed: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// Creates an entry restored from the on-disk ledger.
    ///
    /// The ledger stores only the root path, so `last_accessed` starts as
    /// `None` until the project is touched during this session.
    #[must_use]
    pub fn restored(root: String) -> Self {
        Self {
            root,
            last_accessed: None,
        }
    }

    /// Marks the entry as accessed right now.
    pub fn touch(&mut self) {
        self.last_accessed = Some(chrono::Utc::now().timestamp());
    }

    /// Returns a human-readable string describing how long ago the project was accessed.
    ///
    /// The format varies based on the time elapsed:
    /// - Not accessed this session: "unknown"
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago" (e.g., "5m ago")
    /// - Less than 1 day: "Xh ago" (e.g., "3h ago")
    /// - 1 day or more: "Xd ago" (e.g., "7d ago")
    ///
    /// # Examples
    ///
    /// ```
    /// use trailhead::ProjectEntry;
    ///
    /// let mut entry = ProjectEntry::new("/home/user/code/myproject".to_string());
    /// assert_eq!(entry.time_ago(), "just now");
    ///
    /// entry.last_accessed = Some(chrono::Utc::now().timestamp() - 300);
    /// assert_eq!(entry.time_ago(), "5m ago");
    /// ```
    #[must_use]
    pub fn time_ago(&self) -> String {
        let Some(last_accessed) = self.last_accessed else {
            return "unknown".to_string();
        };
        let now = chrono::Utc::now().timestamp();
        let diff = now - last_accessed;

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            let mins = diff / SECONDS_PER_MINUTE;
            format!("{mins}m ago")
        } else if diff < SECONDS_PER_DAY {
            let hours = diff / SECONDS_PER_HOUR;
            format!("{hours}h ago")
        } else {
            let days = diff / SECONDS_PER_DAY;
            format!("{days}d ago")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restored_entries_have_no_timestamp() {
        let entry = ProjectEntry::restored("/tmp/proj".to_string());
        assert_eq!(entry.last_accessed, None);
        assert_eq!(entry.time_ago(), "unknown");
    }

    #[test]
    fn touch_sets_timestamp() {
        let mut entry = ProjectEntry::restored("/tmp/proj".to_string());
        entry.touch();
        assert!(entry.last_accessed.is_some());
        assert_eq!(entry.time_ago(), "just now");
    }

    #[test]
    fn time_ago_buckets() {
        let now = chrono::Utc::now().timestamp();
        let mut entry = ProjectEntry::new("/tmp/proj".to_string());

        entry.last_accessed = Some(now - 120);
        assert_eq!(entry.time_ago(), "2m ago");

        entry.last_accessed = Some(now - 2 * 3600);
        assert_eq!(entry.time_ago(), "2h ago");

        entry.last_accessed = Some(now - 3 * 86400);
        assert_eq!(entry.time_ago(), "3d ago");
    }
}
