//! Directory listing state for picker-style hosts.
//!
//! [`BrowseState`] is the non-visual half of a file browser: it tracks the
//! current directory, the sorted entry list, and the visibility toggles, and
//! leaves rendering and key handling to the host. The same component serves
//! two flows, distinguished by [`BrowseMode`]: free-form browsing (descend
//! into directories, open files) and project picking (directories only,
//! used to choose a root to register).

use std::cmp::Ordering;

use crate::domain::error::{Result, TrailheadError};
use crate::host::{FileKind, Host};
use crate::infrastructure::paths;
use crate::Config;

/// Which flavor of listing the browser produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// Everything in the directory, directories sorted before files and
    /// dot-entries before the rest within each group.
    Browse,
    /// Directories only, in plain name order. Used when the accepted entry
    /// will become a registered project root.
    ProjectPick,
}

/// Outcome of accepting an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted {
    /// The entry was a directory; the browser descended into it.
    Descended,
    /// The entry was a file; the host was asked to open it.
    Opened,
}

/// One row of the listing.
#[derive(Debug, Clone)]
pub struct BrowseItem {
    /// Absolute path of the entry.
    pub abs_path: String,
    /// Final path component, what a picker displays.
    pub label: String,
    /// Directory/symlink flags as reported by the host.
    pub kind: FileKind,
    /// Whether the current visibility toggles let this row through.
    pub show: bool,
}

impl BrowseItem {
    /// Wraps an absolute path as a listing row.
    ///
    /// # Errors
    ///
    /// Returns [`TrailheadError::InvalidPath`] when `abs_path` is not
    /// absolute.
    pub fn new(abs_path: String, kind: FileKind) -> Result<Self> {
        if !paths::is_absolute(&abs_path) {
            return Err(TrailheadError::InvalidPath(abs_path));
        }
        let label = paths::basename(&abs_path);
        Ok(Self {
            abs_path,
            label,
            kind,
            show: true,
        })
    }
}

/// Lists `dir` through the host, sorted for the given mode.
///
/// # Errors
///
/// Returns [`TrailheadError::InvalidPath`] when `dir` is not an absolute
/// path to a directory, and propagates host I/O failures.
pub fn list_directory<H: Host>(host: &H, dir: &str, mode: BrowseMode) -> Result<Vec<BrowseItem>> {
    if !paths::is_absolute(dir) {
        return Err(TrailheadError::InvalidPath(dir.to_string()));
    }
    let kind = host.stat(dir)?;
    if !kind.is_dir() {
        return Err(TrailheadError::InvalidPath(dir.to_string()));
    }

    let mut entries = host.read_dir(dir)?;
    match mode {
        BrowseMode::Browse => entries.sort_by(browse_order),
        BrowseMode::ProjectPick => {
            entries.retain(|(_, kind)| kind.is_dir());
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        }
    }

    entries
        .into_iter()
        .map(|(name, kind)| BrowseItem::new(paths::join(dir, &name), kind))
        .collect()
}

/// Directories first, then dot-entries first within each group, then name
/// order.
fn browse_order((name_a, kind_a): &(String, FileKind), (name_b, kind_b): &(String, FileKind)) -> Ordering {
    kind_b
        .is_dir()
        .cmp(&kind_a.is_dir())
        .then_with(|| name_b.starts_with('.').cmp(&name_a.starts_with('.')))
        .then_with(|| name_a.cmp(name_b))
}

/// Current directory, entries and visibility toggles of one browsing flow.
#[derive(Debug, Clone)]
pub struct BrowseState {
    mode: BrowseMode,
    current_dir: String,
    items: Vec<BrowseItem>,
    show_hidden: bool,
    filter_enabled: bool,
    filter_names: Vec<String>,
}

impl BrowseState {
    /// Opens a browser at `start_dir`.
    ///
    /// Dot-entries start hidden or shown per `config.hide_dot_files`; the
    /// name filter starts enabled only when `config.browse_filter_names` is
    /// non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`TrailheadError::InvalidPath`] when `start_dir` is not an
    /// absolute path to a directory.
    pub fn open<H: Host>(
        host: &H,
        config: &Config,
        mode: BrowseMode,
        start_dir: &str,
    ) -> Result<Self> {
        let mut state = Self {
            mode,
            current_dir: String::new(),
            items: Vec::new(),
            show_hidden: !config.hide_dot_files,
            filter_enabled: !config.browse_filter_names.is_empty(),
            filter_names: config.browse_filter_names.clone(),
        };
        state.navigate(host, start_dir)?;
        Ok(state)
    }

    /// Re-lists `dir` and makes it the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`TrailheadError::InvalidPath`] when `dir` is not an absolute
    /// path to a directory; the previous listing is left untouched on error.
    pub fn navigate<H: Host>(&mut self, host: &H, dir: &str) -> Result<()> {
        let items = list_directory(host, dir, self.mode)?;
        self.items = items;
        self.current_dir = dir.to_string();
        self.apply_visibility();
        tracing::debug!(dir = %self.current_dir, entries = self.items.len(), "listed directory");
        Ok(())
    }

    /// Moves to the parent directory; no-op at the filesystem root.
    pub fn go_up<H: Host>(&mut self, host: &H) -> Result<()> {
        match paths::parent(&self.current_dir) {
            Some(up) => self.navigate(host, &up),
            None => Ok(()),
        }
    }

    /// Jumps to the host's home directory.
    pub fn go_home<H: Host>(&mut self, host: &H) -> Result<()> {
        let home = host.home_dir();
        self.navigate(host, &home)
    }

    /// Jumps to the filesystem root.
    pub fn go_root<H: Host>(&mut self, host: &H) -> Result<()> {
        self.navigate(host, "/")
    }

    /// Accepts `path`: descend when it is a directory, otherwise ask the
    /// host to open it.
    ///
    /// The entry is re-stat'ed rather than trusted from the listing, so a
    /// row that changed type since the last refresh still does the right
    /// thing.
    pub fn accept<H: Host>(&mut self, host: &H, path: &str) -> Result<Accepted> {
        let kind = host.stat(path)?;
        if kind.is_dir() {
            self.navigate(host, path)?;
            Ok(Accepted::Descended)
        } else {
            host.open_file(path)?;
            Ok(Accepted::Opened)
        }
    }

    /// Flips dot-entry visibility.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.apply_visibility();
    }

    /// Flips the configured name filter.
    pub fn toggle_filter(&mut self) {
        self.filter_enabled = !self.filter_enabled;
        self.apply_visibility();
    }

    /// The directory currently listed.
    #[must_use]
    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    #[must_use]
    pub fn mode(&self) -> BrowseMode {
        self.mode
    }

    /// Every entry of the current directory, visible or not.
    #[must_use]
    pub fn items(&self) -> &[BrowseItem] {
        &self.items
    }

    /// The rows that pass the current visibility toggles.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&BrowseItem> {
        self.items.iter().filter(|item| item.show).collect()
    }

    fn apply_visibility(&mut self) {
        for item in &mut self.items {
            if !self.show_hidden && item.label.starts_with('.') {
                item.show = false;
                continue;
            }
            if self.filter_enabled && self.filter_names.iter().any(|name| name == &item.label) {
                item.show = false;
                continue;
            }
            item.show = true;
        }
    }
}
