//! Bounded cache of resolved file descriptors.
//!
//! Keyed by absolute file path, valued by [`FileItem`]. This is a derived
//! index shared by the resolver (tier-1 lookups) and the project-file listing
//! path so repeat scans of the same project reuse descriptors instead of
//! rebuilding labels and re-statting files.

use crate::cache::ordered_map::BoundedOrderedMap;
use crate::domain::FileItem;

/// Most-recently-used cache of [`FileItem`]s, bounded by construction.
///
/// Lookups promote; overflow silently drops the least recently used
/// descriptor together with its accumulated owner set.
pub struct FileItemCache {
    items: BoundedOrderedMap<String, FileItem>,
}

impl FileItemCache {
    /// Creates a cache holding at most `capacity` descriptors.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            items: BoundedOrderedMap::new(capacity),
        }
    }

    /// Whether a descriptor for `path` is cached, without promoting it.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.items.contains_key(path)
    }

    /// Returns the descriptor for `path`, promoting it to most recent.
    pub fn get(&mut self, path: &str) -> Option<&FileItem> {
        self.items.get(path)
    }

    /// Mutable access to the descriptor for `path`, promoting it.
    ///
    /// Used to accumulate owning roots on an already-cached descriptor.
    pub fn get_mut(&mut self, path: &str) -> Option<&mut FileItem> {
        self.items.get_mut(path)
    }

    /// Caches `item` under its absolute path, promoting it to most recent.
    pub fn insert(&mut self, item: FileItem) {
        self.items.insert(item.abs_path.clone(), item);
    }

    /// Number of cached descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no descriptors are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
