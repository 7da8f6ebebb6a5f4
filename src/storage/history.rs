//! Per-project file recency, persisted to the rank ledger.
//!
//! Maps project name to a [`RecencyCache`] of the files recently opened in
//! that project. On disk this is a JSON object of project name to an array
//! of absolute file paths in ascending recency (index 0 = least recent
//! retained). Projects serialize in name order so the same state always
//! produces the same bytes, which is what lets the content-hash gate skip
//! rewrites.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::cache::{RecencyCache, ABSENT_RANK};
use crate::domain::error::{Result, TrailheadError};
use crate::storage::ledger::LedgerFile;

/// Recency ledger: one bounded file-rank cache per project.
pub struct RecentHistoryLedger {
    ledger: LedgerFile,
    per_project_capacity: usize,
    caches: BTreeMap<String, RecencyCache<String>>,
}

impl RecentHistoryLedger {
    /// Opens the ledger at `path`, creating it if missing and replaying
    /// whatever it holds.
    ///
    /// # Errors
    ///
    /// Returns an error when the ledger cannot be created, read, or parsed.
    ///
    /// # Panics
    ///
    /// Panics when `per_project_capacity` is zero.
    pub fn open(path: PathBuf, per_project_capacity: usize) -> Result<Self> {
        assert!(
            per_project_capacity > 0,
            "recency ledger capacity must be non-zero"
        );
        tracing::debug!(path = %path.display(), per_project_capacity, "opening recency ledger");
        let mut history = Self {
            ledger: LedgerFile::new(path),
            per_project_capacity,
            caches: BTreeMap::new(),
        };
        history.load()?;
        Ok(history)
    }

    /// Path of the backing ledger file.
    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        self.ledger.path()
    }

    /// Re-reads the ledger if its content changed since the last sync;
    /// returns whether a rebuild happened.
    ///
    /// Each stored array is replayed through `put` in order, so disk order
    /// (ascending recency) restores the same ranks it was saved with.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a JSON object.
    pub fn load(&mut self) -> Result<bool> {
        let _span = tracing::debug_span!("history_load").entered();

        let Some(contents) = self.ledger.read_if_changed()? else {
            return Ok(false);
        };

        let parsed: Map<String, Value> = serde_json::from_str(&contents)
            .map_err(|e| TrailheadError::Storage(format!("failed to parse recency ledger: {e}")))?;

        let capacity = self.per_project_capacity;
        self.caches.clear();
        for (project, value) in &parsed {
            let Some(entries) = value.as_array() else {
                tracing::warn!(project = %project, "skipping non-array recency entry");
                continue;
            };
            let cache = self
                .caches
                .entry(project.clone())
                .or_insert_with(|| RecencyCache::new(capacity));
            for entry in entries {
                if let Some(path) = entry.as_str() {
                    cache.put(path.to_string());
                }
            }
        }

        tracing::debug!(projects = self.caches.len(), "recency ledger loaded");
        Ok(true)
    }

    /// Records that `path` was just accessed within `project`.
    pub fn record(&mut self, project: &str, path: &str) {
        let capacity = self.per_project_capacity;
        self.caches
            .entry(project.to_string())
            .or_insert_with(|| RecencyCache::new(capacity))
            .put(path.to_string());
    }

    /// Rank of `path` within `project`, or [`ABSENT_RANK`] when the project
    /// has no recency cache or has never seen the path.
    #[must_use]
    pub fn rank(&self, project: &str, path: &str) -> i64 {
        self.caches
            .get(project)
            .map_or(ABSENT_RANK, |cache| cache.rank(path))
    }

    /// The recency cache for `project`, if any file was ever recorded.
    #[must_use]
    pub fn cache(&self, project: &str) -> Option<&RecencyCache<String>> {
        self.caches.get(project)
    }

    /// Serializes all caches and writes through the hash gate; returns
    /// whether a write actually happened.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn save(&mut self) -> Result<bool> {
        let _span = tracing::debug_span!("history_save").entered();

        let mut object = Map::new();
        for (project, cache) in &self.caches {
            let files: Vec<Value> = cache
                .iter()
                .map(|(path, _)| Value::String(path.clone()))
                .collect();
            object.insert(project.clone(), Value::Array(files));
        }
        let json = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
            TrailheadError::Storage(format!("failed to serialize recency ledger: {e}"))
        })?;

        self.ledger.write_if_changed(&json)
    }
}
