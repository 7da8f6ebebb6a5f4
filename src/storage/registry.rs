//! Bounded project registry persisted to the project-list ledger.
//!
//! The registry owns the access-ordered map of known projects and the ledger
//! file that mirrors it. On disk the ledger is a JSON object of project name
//! to absolute root path, ordered newest-first; loading iterates the parsed
//! object in reverse so that sequential inserts rebuild the same recency
//! order, with the first entry on disk ending up at the head of the map.
//!
//! Every mutation that reaches disk goes through the content-hash gate in
//! [`LedgerFile`], because touches arrive on every editor focus change and
//! almost never change the serialized ledger.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::cache::BoundedOrderedMap;
use crate::domain::error::{Result, TrailheadError};
use crate::domain::ProjectEntry;
use crate::infrastructure::paths;
use crate::storage::ledger::LedgerFile;

/// Access-ordered registry of known projects with ledger persistence.
pub struct ProjectRegistry {
    ledger: LedgerFile,
    projects: BoundedOrderedMap<String, ProjectEntry>,
}

impl ProjectRegistry {
    /// Opens the registry at `path`, creating the ledger if missing and
    /// loading whatever it holds.
    ///
    /// # Errors
    ///
    /// Returns an error when the ledger cannot be created, read, or parsed.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    pub fn open(path: PathBuf, capacity: usize) -> Result<Self> {
        tracing::debug!(path = %path.display(), capacity, "opening project registry");
        let mut registry = Self {
            ledger: LedgerFile::new(path),
            projects: BoundedOrderedMap::new(capacity),
        };
        registry.load()?;
        Ok(registry)
    }

    /// Path of the backing ledger file.
    #[must_use]
    pub fn ledger_path(&self) -> &Path {
        self.ledger.path()
    }

    /// Re-reads the ledger if its content changed since the last sync.
    ///
    /// Returns whether a rebuild happened. On rebuild the in-memory map is
    /// replaced wholesale: the disk is the source of truth for external
    /// edits. Entries restored this way carry no access timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a JSON object.
    pub fn load(&mut self) -> Result<bool> {
        let _span = tracing::debug_span!("registry_load").entered();

        let Some(contents) = self.ledger.read_if_changed()? else {
            return Ok(false);
        };

        let parsed: Map<String, Value> = serde_json::from_str(&contents)
            .map_err(|e| TrailheadError::Storage(format!("failed to parse project ledger: {e}")))?;

        self.projects.clear();
        // Disk order is newest-first; inserting in reverse leaves the first
        // entry on disk at the head of the map.
        for (name, value) in parsed.iter().rev() {
            match value.as_str() {
                Some(root) => {
                    self.projects
                        .insert(name.clone(), ProjectEntry::restored(root.to_string()));
                }
                None => {
                    tracing::warn!(project = %name, "skipping non-string ledger entry");
                }
            }
        }

        tracing::debug!(count = self.projects.len(), "project registry loaded");
        Ok(true)
    }

    /// Registers an access of `name` at `root`: upserts the entry at the head
    /// of the recency order, sweeps stale entries, and persists.
    ///
    /// The ledger is re-read first, so entries hand-added to the file since
    /// the last sync survive the write-back. An existing entry under the same
    /// name keeps its identity when the root matches (refreshing its access
    /// timestamp) and is overwritten when the root differs, so a project name
    /// can never stay stuck on a stale path.
    ///
    /// # Errors
    ///
    /// Returns an error when reloading or persisting fails.
    pub fn touch(&mut self, name: &str, root: &str) -> Result<()> {
        let _span = tracing::debug_span!("registry_touch", name = %name, root = %root).entered();

        // Disk wins on load, this touch wins on persist.
        self.load()?;

        let fresh = match self.projects.get_mut(name) {
            Some(existing) if existing.root == root => {
                existing.touch();
                None
            }
            _ => Some(ProjectEntry::new(root.to_string())),
        };
        if let Some(entry) = fresh {
            self.projects.insert(name.to_string(), entry);
        }

        self.reconcile();
        self.persist()?;
        Ok(())
    }

    /// Drops entries whose root is no longer usable: relative paths and
    /// paths that vanished from the filesystem.
    ///
    /// Stale entries are logged, never surfaced; a project directory being
    /// deleted out from under the registry is normal operation.
    pub fn reconcile(&mut self) {
        let stale: Vec<(String, String)> = self
            .projects
            .iter()
            .filter(|(_, entry)| {
                !paths::is_absolute(&entry.root) || !Path::new(&entry.root).exists()
            })
            .map(|(name, entry)| (name.clone(), entry.root.clone()))
            .collect();

        for (name, root) in stale {
            tracing::debug!(project = %name, root = %root, "removing stale project entry");
            self.projects.remove(&name);
        }
    }

    /// Serializes the registry newest-first and writes it through the hash
    /// gate. Returns whether a write actually happened.
    ///
    /// # Errors
    ///
    /// Returns an error when serialization or the write fails.
    pub fn persist(&mut self) -> Result<bool> {
        let _span = tracing::debug_span!("registry_persist").entered();

        let mut object = Map::new();
        for (name, entry) in self.projects.iter() {
            object.insert(name.clone(), Value::String(entry.root.clone()));
        }
        let json = serde_json::to_string_pretty(&Value::Object(object)).map_err(|e| {
            TrailheadError::Storage(format!("failed to serialize project ledger: {e}"))
        })?;

        self.ledger.write_if_changed(&json)
    }

    /// Removes `name` from the registry and persists when it was present.
    ///
    /// External ledger edits are re-read first, so removal acts on (and the
    /// write-back preserves) the current on-disk state.
    ///
    /// # Errors
    ///
    /// Returns an error when reloading or persisting fails.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        self.load()?;
        let removed = self.projects.remove(name);
        if removed {
            tracing::debug!(project = %name, "project removed from registry");
            self.persist()?;
        }
        Ok(removed)
    }

    /// Whether a project named `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.projects.contains_key(name)
    }

    /// The entry for `name`, without touching recency order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ProjectEntry> {
        self.projects.peek(name)
    }

    /// `(name, entry)` pairs from most to least recently touched.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &ProjectEntry)> {
        self.projects.iter()
    }

    /// Project names from most to least recently touched.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.projects.keys()
    }

    /// Number of registered projects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}
