//! Host implementation backed by the local filesystem.
//!
//! [`NativeHost`] answers stat and directory listings from `std::fs`, keeps
//! the workspace folder list in memory, and turns the open/notify commands
//! into tracing events. It is the host used by headless embeddings and by
//! tools that run the navigation core outside an editor.

use std::cell::RefCell;
use std::fs;

use crate::domain::error::Result;
use crate::host::{FileKind, Host};
use crate::infrastructure::paths;

/// A [`Host`] over the local filesystem with in-memory workspace folders.
#[derive(Default)]
pub struct NativeHost {
    folders: RefCell<Vec<String>>,
}

impl NativeHost {
    /// Creates a host with no workspace folders open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for NativeHost {
    fn stat(&self, path: &str) -> Result<FileKind> {
        let symlink = fs::symlink_metadata(path)?.file_type().is_symlink();
        // Follows the link, so a symlinked directory stats as a directory.
        let metadata = fs::metadata(path)?;
        Ok(FileKind {
            directory: metadata.is_dir(),
            symlink,
        })
    }

    fn read_dir(&self, dir: &str) -> Result<Vec<(String, FileKind)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;
            let kind = if file_type.is_symlink() {
                let directory = fs::metadata(entry.path()).map_or(false, |m| m.is_dir());
                FileKind {
                    directory,
                    symlink: true,
                }
            } else {
                FileKind {
                    directory: file_type.is_dir(),
                    symlink: false,
                }
            };
            entries.push((name, kind));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }

    fn home_dir(&self) -> String {
        dirs::home_dir().map_or_else(|| "/".to_string(), |home| home.to_string_lossy().into_owned())
    }

    fn workspace_folders(&self) -> Vec<String> {
        self.folders.borrow().clone()
    }

    fn workspace_folder_of(&self, path: &str) -> Option<String> {
        self.folders
            .borrow()
            .iter()
            .find(|root| {
                path == root.as_str() || path.starts_with(&paths::ensure_trailing_sep(root))
            })
            .cloned()
    }

    fn add_workspace_folder(&self, root: &str) -> Result<()> {
        let mut folders = self.folders.borrow_mut();
        if !folders.iter().any(|folder| folder == root) {
            folders.push(root.to_string());
        }
        Ok(())
    }

    fn remove_workspace_folder(&self, root: &str) -> Result<bool> {
        let mut folders = self.folders.borrow_mut();
        let before = folders.len();
        folders.retain(|folder| folder != root);
        Ok(folders.len() < before)
    }

    fn open_file(&self, path: &str) -> Result<()> {
        tracing::info!(path = %path, "open file requested");
        Ok(())
    }

    fn notify(&self, message: &str) {
        tracing::info!(message = %message, "host notification");
    }
}
