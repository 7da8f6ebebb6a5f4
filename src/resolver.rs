//! Multi-tier project-root resolution.
//!
//! Maps an arbitrary absolute path to the project root that owns it, trying
//! four tiers in strictly increasing cost: the file-descriptor cache, the
//! host's open workspace folders, a prefix scan of the registered projects,
//! and finally an upward filesystem walk looking for marker files. The first
//! tier that answers wins.
//!
//! Resolution never writes anything. Registering the result (ledger upsert,
//! recency record) is the caller's business; the only side effect here is
//! that a tier-1 hit promotes the descriptor in its cache.

use std::collections::BTreeSet;

use crate::cache::FileItemCache;
use crate::domain::error::Result;
use crate::host::Host;
use crate::infrastructure::paths;
use crate::storage::ProjectRegistry;
use crate::Config;

/// Borrowed view over everything resolution needs.
///
/// Constructed per call site by [`NavigationSession`](crate::NavigationSession);
/// the struct only bundles borrows so the tier logic has one home.
pub struct ProjectResolver<'a, H: Host> {
    host: &'a H,
    registry: &'a ProjectRegistry,
    file_items: &'a mut FileItemCache,
    markers: BTreeSet<&'a str>,
    home: String,
}

impl<'a, H: Host> ProjectResolver<'a, H> {
    /// Builds a resolver over the session's host, config and caches.
    pub fn new(
        host: &'a H,
        config: &'a Config,
        registry: &'a ProjectRegistry,
        file_items: &'a mut FileItemCache,
    ) -> Self {
        let markers = config
            .marker_file_names
            .iter()
            .map(String::as_str)
            .collect();
        let home = host.home_dir();
        Self {
            host,
            registry,
            file_items,
            markers,
            home,
        }
    }

    /// Resolves the project root owning `path`, or `Ok(None)` when no tier
    /// can answer.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures from the stat and directory listings of
    /// the marker walk. A path that simply belongs to no project is not an
    /// error.
    pub fn resolve(&mut self, path: &str) -> Result<Option<String>> {
        if let Some(root) = self.from_file_items(path) {
            tracing::debug!(path = %path, root = %root, "resolved via file item cache");
            return Ok(Some(root));
        }

        if let Some(root) = self.host.workspace_folder_of(path) {
            tracing::debug!(path = %path, root = %root, "resolved via workspace folder");
            return Ok(Some(root));
        }

        if let Some(root) = self.from_registry(path) {
            tracing::debug!(path = %path, root = %root, "resolved via registered project");
            return Ok(Some(root));
        }

        if let Some(root) = self.walk_for_marker(path)? {
            tracing::debug!(path = %path, root = %root, "resolved via marker walk");
            return Ok(Some(root));
        }

        tracing::debug!(path = %path, "no project found for path");
        Ok(None)
    }

    fn from_file_items(&mut self, path: &str) -> Option<String> {
        self.file_items
            .get(path)
            .and_then(|item| item.first_owner().map(str::to_string))
    }

    /// Prefix scan in recency order, so when nested projects both match,
    /// the more recently touched one wins.
    fn from_registry(&self, path: &str) -> Option<String> {
        for (_, entry) in self.registry.entries() {
            if path.starts_with(&paths::ensure_trailing_sep(&entry.root)) {
                return Some(entry.root.clone());
            }
        }
        None
    }

    /// Walks parent directories looking for a configured marker file.
    ///
    /// The walk gives up when it reaches the filesystem root or the home
    /// directory; neither is ever tested, so a stray marker in `$HOME`
    /// cannot turn the home directory into a project.
    fn walk_for_marker(&self, path: &str) -> Result<Option<String>> {
        let kind = self.host.stat(path)?;
        let mut dir = if kind.is_dir() {
            path.to_string()
        } else {
            match paths::parent(path) {
                Some(parent) => parent,
                None => return Ok(None),
            }
        };

        loop {
            if dir == "/" || dir == self.home {
                break;
            }

            let entries = self.host.read_dir(&dir)?;
            if entries
                .iter()
                .any(|(name, _)| self.markers.contains(name.as_str()))
            {
                return Ok(Some(dir));
            }

            match paths::parent(&dir) {
                Some(parent) => dir = parent,
                None => break,
            }
        }

        Ok(None)
    }
}
