//! Scripted in-memory host for unit tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;

use crate::domain::error::Result;
use crate::host::{FileKind, Host};
use crate::infrastructure::paths;

/// A [`Host`] over a scripted in-memory tree.
///
/// Tests declare directories and files up front, then observe which paths the
/// code under test opened and which notifications it sent.
pub struct ScriptedHost {
    home: String,
    dirs: RefCell<BTreeSet<String>>,
    files: RefCell<BTreeMap<String, String>>,
    folders: RefCell<Vec<String>>,
    opened: RefCell<Vec<String>>,
    notices: RefCell<Vec<String>>,
}

impl ScriptedHost {
    pub fn new(home: &str) -> Self {
        let host = Self {
            home: home.to_string(),
            dirs: RefCell::new(BTreeSet::new()),
            files: RefCell::new(BTreeMap::new()),
            folders: RefCell::new(Vec::new()),
            opened: RefCell::new(Vec::new()),
            notices: RefCell::new(Vec::new()),
        };
        host.add_dir("/");
        host.add_dir(home);
        host
    }

    /// Declares a directory, creating all ancestors.
    pub fn add_dir(&self, path: &str) {
        let mut dirs = self.dirs.borrow_mut();
        let mut current = path.to_string();
        loop {
            dirs.insert(current.clone());
            match paths::parent(&current) {
                Some(parent) if parent != current => current = parent,
                _ => break,
            }
        }
    }

    /// Declares an empty file, creating its ancestor directories.
    pub fn add_file(&self, path: &str) {
        self.add_file_with(path, "");
    }

    /// Declares a file with contents, creating its ancestor directories.
    pub fn add_file_with(&self, path: &str, contents: &str) {
        if let Some(parent) = paths::parent(path) {
            self.add_dir(&parent);
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), contents.to_string());
    }

    /// Paths the code under test asked the host to open.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    /// Messages the code under test asked the host to show.
    pub fn notices(&self) -> Vec<String> {
        self.notices.borrow().clone()
    }
}

impl Host for ScriptedHost {
    fn stat(&self, path: &str) -> Result<FileKind> {
        if self.dirs.borrow().contains(path) {
            Ok(FileKind::directory())
        } else if self.files.borrow().contains_key(path) {
            Ok(FileKind::file())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, path.to_string()).into())
        }
    }

    fn read_dir(&self, dir: &str) -> Result<Vec<(String, FileKind)>> {
        if !self.dirs.borrow().contains(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, dir.to_string()).into());
        }

        let mut entries = Vec::new();
        for child in self.dirs.borrow().iter() {
            if paths::parent(child).as_deref() == Some(dir) {
                entries.push((paths::basename(child), FileKind::directory()));
            }
        }
        for child in self.files.borrow().keys() {
            if paths::parent(child).as_deref() == Some(dir) {
                entries.push((paths::basename(child), FileKind::file()));
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    fn read_file(&self, path: &str) -> Result<String> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, path.to_string()).into()
        })
    }

    fn home_dir(&self) -> String {
        self.home.clone()
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
        self.opened.borrow_mut().push(path.to_string());
        Ok(())
    }

    fn notify(&self, message: &str) {
        self.notices.borrow_mut().push(message.to_string());
    }
}
