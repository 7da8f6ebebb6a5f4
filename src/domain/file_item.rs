//! File descriptor domain model.
//!
//! This module defines [`FileItem`], the cached descriptor for a file seen
//! during project scans or resolution. A file can sit under several project
//! roots at once (nested checkouts, overlapping workspaces), so the descriptor
//! accumulates owning roots instead of holding a single one.

use std::collections::BTreeSet;

use crate::domain::error::{Result, TrailheadError};
use crate::infrastructure::paths;

/// A resolved file with its owning project roots and display labels.
///
/// # Fields
///
/// - `abs_path`: Absolute path to the file; construction refuses anything else
/// - `owning_roots`: Every project root this file has been seen under; grows
///   across resolutions and only disappears with the whole cache entry
/// - `display_name`: Basename, for list rendering
/// - `relative_label`: Path relative to the root the descriptor was first
///   created under, for disambiguation next to the display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub abs_path: String,
    pub owning_roots: BTreeSet<String>,
    pub display_name: String,
    pub relative_label: String,
}

impl FileItem {
    /// Creates a descriptor for `abs_path` owned by `owning_root`.
    ///
    /// # Errors
    ///
    /// Returns [`TrailheadError::InvalidPath`] when `abs_path` is not absolute.
    pub fn new(abs_path: String, owning_root: &str) -> Result<Self> {
        if !paths::is_absolute(&abs_path) {
            return Err(TrailheadError::InvalidPath(abs_path));
        }

        let display_name = paths::basename(&abs_path);
        let relative_label = paths::relative_to(owning_root, &abs_path);
        let mut owning_roots = BTreeSet::new();
        owning_roots.insert(owning_root.to_string());

        Ok(Self {
            abs_path,
            owning_roots,
            display_name,
            relative_label,
        })
    }

    /// Records one more project root owning this file.
    ///
    /// Returns `true` when the root was not already known. Labels keep
    /// referring to the first owner.
    pub fn add_owner(&mut self, root: &str) -> bool {
        self.owning_roots.insert(root.to_string())
    }

    /// Returns the first owning root in set-iteration order.
    ///
    /// `BTreeSet` iteration makes this the lexicographically smallest root,
    /// so repeated lookups for the same descriptor resolve identically.
    #[must_use]
    pub fn first_owner(&self) -> Option<&str> {
        self.owning_roots.iter().next().map(String::as_str)
    }
}
