//! Host editor abstraction.
//!
//! This module defines the [`Host`] trait that abstracts over the embedding
//! editor: filesystem access routed through the editor's own layer, workspace
//! folder management, and the open/notify actions the navigation core asks
//! the editor to perform.
//!
//! # Design Philosophy
//!
//! The trait is minimal and command-shaped: every method maps to one call the
//! original navigation flows make against the editor API. Methods take
//! `&self` because the host is an external collaborator, not state owned by
//! the session; implementations that track workspace folders in memory use
//! interior mutability.

pub mod native;

#[cfg(test)]
pub mod testing;

pub use native::NativeHost;

use crate::domain::error::Result;

/// What a path points at, as reported by the host.
///
/// Symlinks are reported together with the kind of their target so a symlink
/// to a directory still browses like a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileKind {
    pub directory: bool,
    pub symlink: bool,
}

impl FileKind {
    /// A regular file.
    #[must_use]
    pub const fn file() -> Self {
        Self {
            directory: false,
            symlink: false,
        }
    }

    /// A directory.
    #[must_use]
    pub const fn directory() -> Self {
        Self {
            directory: true,
            symlink: false,
        }
    }

    /// Whether the entry behaves as a directory (including dir symlinks).
    #[must_use]
    pub const fn is_dir(self) -> bool {
        self.directory
    }

    /// Whether the entry is a symlink (of either target kind).
    #[must_use]
    pub const fn is_symlink(self) -> bool {
        self.symlink
    }
}

/// Abstraction over the embedding editor host.
///
/// # Implementations
///
/// - [`NativeHost`]: answers from `std::fs` and keeps workspace folders in
///   memory; for headless embedding and tools.
///
/// # Examples
///
/// ```no_run
/// use trailhead::host::{Host, NativeHost};
///
/// let host = NativeHost::new();
/// let kind = host.stat("/etc")?;
/// assert!(kind.is_dir());
/// # Ok::<(), trailhead::TrailheadError>(())
/// ```
pub trait Host: Send {
    /// Stats `path`.
    ///
    /// # Errors
    ///
    /// Returns an error when the path does not exist or cannot be inspected.
    fn stat(&self, path: &str) -> Result<FileKind>;

    /// Lists the entries of `dir` as `(name, kind)` pairs, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns an error when `dir` cannot be read.
    fn read_dir(&self, dir: &str) -> Result<Vec<(String, FileKind)>>;

    /// Reads the contents of `path` as UTF-8 text.
    ///
    /// Used for small project-side files such as ignore lists.
    ///
    /// # Errors
    ///
    /// Returns an error when the file does not exist or cannot be read.
    fn read_file(&self, path: &str) -> Result<String>;

    /// The user's home directory.
    fn home_dir(&self) -> String;

    /// Roots of the currently open workspace folders, in host order.
    fn workspace_folders(&self) -> Vec<String>;

    /// The workspace folder containing `path`, if any.
    fn workspace_folder_of(&self, path: &str) -> Option<String>;

    /// Opens `root` as a workspace folder.
    ///
    /// # Errors
    ///
    /// Returns an error when the host rejects the folder.
    fn add_workspace_folder(&self, root: &str) -> Result<()>;

    /// Closes the workspace folder rooted at `root`.
    ///
    /// Returns whether such a folder was open.
    ///
    /// # Errors
    ///
    /// Returns an error when the host fails to remove the folder.
    fn remove_workspace_folder(&self, root: &str) -> Result<bool>;

    /// Asks the host to open `path` in an editor view.
    ///
    /// # Errors
    ///
    /// Returns an error when the host cannot open the file.
    fn open_file(&self, path: &str) -> Result<()>;

    /// Shows an informational message to the user.
    fn notify(&self, message: &str);
}
