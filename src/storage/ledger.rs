//! On-disk JSON ledger file with content-hash change detection.
//!
//! Both registries persist to small JSON files that a human or another
//! process may edit at any time. [`LedgerFile`] wraps one such file and keeps
//! the blake3 digest of the last content it synchronized, so reads can skip
//! rebuilding unchanged state and writes can skip rewriting identical bytes.
//! Writes go through a temporary sibling plus rename so the ledger is never
//! observed half-written.

use std::fs;
use std::path::{Path, PathBuf};

use blake3::Hasher;

use crate::domain::error::Result;

/// The JSON object written when a ledger file does not exist yet.
const EMPTY_LEDGER: &str = "{}";

/// One ledger file plus the digest of the content last seen or written.
pub struct LedgerFile {
    file_path: PathBuf,
    last_hash: Option<String>,
}

impl LedgerFile {
    /// Wraps `file_path` without touching the filesystem yet.
    #[must_use]
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            last_hash: None,
        }
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the ledger, creating it as `{}` (with parent directories) first
    /// if it does not exist.
    ///
    /// Returns `Ok(None)` when the content hash matches the last
    /// synchronized state, meaning the caller's in-memory view is already
    /// current. Returns the full content otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be created or read.
    pub fn read_if_changed(&mut self) -> Result<Option<String>> {
        let _span =
            tracing::debug_span!("ledger_read", path = %self.file_path.display()).entered();

        if !self.file_path.exists() {
            if let Some(parent) = self.file_path.parent() {
                fs::create_dir_all(parent)?;
            }
            tracing::debug!("creating empty ledger");
            fs::write(&self.file_path, EMPTY_LEDGER)?;
        }

        let contents = fs::read_to_string(&self.file_path)?;
        let hash = content_hash(&contents);
        if self.last_hash.as_deref() == Some(hash.as_str()) {
            tracing::trace!("ledger unchanged since last sync");
            return Ok(None);
        }

        self.last_hash = Some(hash);
        Ok(Some(contents))
    }

    /// Writes `contents` atomically unless it hashes to the last
    /// synchronized state.
    ///
    /// Returns whether a write actually happened. The skip makes persisting
    /// after every project touch cheap: focus-change events fire often and
    /// usually change nothing.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary file cannot be written or the
    /// rename fails.
    pub fn write_if_changed(&mut self, contents: &str) -> Result<bool> {
        let _span =
            tracing::debug_span!("ledger_write", path = %self.file_path.display()).entered();

        let hash = content_hash(contents);
        if self.last_hash.as_deref() == Some(hash.as_str()) {
            tracing::trace!("skipping write, content unchanged");
            return Ok(false);
        }

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = self.file_path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(&tmp_path, &self.file_path)?;

        self.last_hash = Some(hash);
        tracing::debug!("ledger written");
        Ok(true)
    }
}

fn content_hash(contents: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(contents.as_bytes());
    hasher.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_ledger_as_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");

        let mut ledger = LedgerFile::new(path.clone());
        let contents = ledger.read_if_changed().unwrap();

        assert_eq!(contents.as_deref(), Some("{}"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn second_read_without_changes_returns_none() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = LedgerFile::new(dir.path().join("ledger.json"));

        assert!(ledger.read_if_changed().unwrap().is_some());
        assert!(ledger.read_if_changed().unwrap().is_none());
    }

    #[test]
    fn external_edit_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.json");
        let mut ledger = LedgerFile::new(path.clone());
        let _ = ledger.read_if_changed().unwrap();

        fs::write(&path, r#"{"edited": true}"#).unwrap();

        let contents = ledger.read_if_changed().unwrap();
        assert_eq!(contents.as_deref(), Some(r#"{"edited": true}"#));
    }

    #[test]
    fn identical_write_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = LedgerFile::new(dir.path().join("ledger.json"));

        assert!(ledger.write_if_changed("{\"a\": 1}").unwrap());
        assert!(!ledger.write_if_changed("{\"a\": 1}").unwrap());
        assert!(ledger.write_if_changed("{\"a\": 2}").unwrap());
    }

    #[test]
    fn write_then_read_reports_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = LedgerFile::new(dir.path().join("ledger.json"));

        ledger.write_if_changed("{\"a\": 1}").unwrap();
        assert!(ledger.read_if_changed().unwrap().is_none());
    }
}
