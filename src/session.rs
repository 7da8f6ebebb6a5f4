//! The navigation session: the one context object embedders talk to.
//!
//! [`NavigationSession`] owns the host handle, the configuration, both
//! on-disk ledgers, the file-descriptor cache, and the optional browse
//! state, and exposes every user-facing operation as a method. There is no
//! module-level state anywhere in the crate; two sessions over two homes
//! coexist without touching each other.
//!
//! # Event Flow
//!
//! Hosts forward two kinds of filesystem events here. A file being opened
//! goes through [`register_file_open`](NavigationSession::register_file_open):
//! the owning project is resolved and upserted into the registry, and the
//! file is recorded in that project's recency history. Workspace folders
//! being added go through
//! [`register_workspace_folders`](NavigationSession::register_workspace_folders),
//! which registers each folder as a project. Both write back to disk behind
//! the ledgers' content-hash gate, so an event that changes nothing costs no
//! write.
//!
//! # Path Normalization
//!
//! Every path argument is normalized on entry: configured alias prefixes are
//! rewritten first, then a leading `~` expands to the host's home directory.
//! Internal state only ever holds normalized absolute paths.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::browse::{Accepted, BrowseMode, BrowseState};
use crate::cache::FileItemCache;
use crate::domain::error::Result;
use crate::domain::{FileItem, ProjectEntry};
use crate::host::Host;
use crate::infrastructure::paths;
use crate::resolver::ProjectResolver;
use crate::search::FuzzyFilter;
use crate::storage::{ProjectRegistry, RecentHistoryLedger};
use crate::Config;

/// Default project ledger file name, created under the host's home.
pub const PROJECT_LEDGER_NAME: &str = ".project-manager.json";

/// Default recency ledger file name, created under the host's home.
pub const HISTORY_LEDGER_NAME: &str = ".project-manager-rank.json";

/// Owns all navigation state for one embedding host.
///
/// # Examples
///
/// ```no_run
/// use trailhead::host::NativeHost;
/// use trailhead::{Config, NavigationSession};
///
/// let mut session = NavigationSession::new(NativeHost::new(), Config::default())?;
/// if let Some(root) = session.register_file_open("/work/app/src/main.rs")? {
///     println!("editing in {root}");
/// }
/// # Ok::<(), trailhead::TrailheadError>(())
/// ```
pub struct NavigationSession<H: Host> {
    host: H,
    config: Config,
    registry: ProjectRegistry,
    history: RecentHistoryLedger,
    file_items: FileItemCache,
    browse: Option<BrowseState>,
}

impl<H: Host> NavigationSession<H> {
    /// Opens a session, creating both ledger files when missing.
    ///
    /// Ledger locations come from the config when set, otherwise they
    /// default to [`PROJECT_LEDGER_NAME`] and [`HISTORY_LEDGER_NAME`] under
    /// the host's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error when either ledger cannot be read or created.
    pub fn new(host: H, config: Config) -> Result<Self> {
        let home = host.home_dir();
        let project_ledger = config
            .project_list_path
            .clone()
            .unwrap_or_else(|| Path::new(&home).join(PROJECT_LEDGER_NAME));
        let history_ledger = config
            .recent_history_path
            .clone()
            .unwrap_or_else(|| Path::new(&home).join(HISTORY_LEDGER_NAME));

        let registry = ProjectRegistry::open(project_ledger, config.project_capacity)?;
        let history = RecentHistoryLedger::open(history_ledger, config.recent_files_per_project)?;
        let file_items = FileItemCache::new(config.file_item_cache_capacity);

        Ok(Self {
            host,
            config,
            registry,
            history,
            file_items,
            browse: None,
        })
    }

    /// The embedding host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rewrites alias prefixes, then expands a leading tilde.
    fn normalize(&self, path: &str) -> String {
        let aliased = paths::apply_aliases(path, &self.config.path_alias_mappings);
        paths::expand_tilde(&aliased, &self.host.home_dir())
    }

    fn resolve_normalized(&mut self, path: &str) -> Result<Option<String>> {
        ProjectResolver::new(&self.host, &self.config, &self.registry, &mut self.file_items)
            .resolve(path)
    }

    /// Re-reads both ledgers, picking up edits made outside this session.
    ///
    /// Hosts call this on focus regain or before showing a picker. Every
    /// touch and record path also reloads on its own, so hand edits survive
    /// write-backs either way; this method just makes them visible to the
    /// read-only accessors without waiting for the next touch.
    ///
    /// # Errors
    ///
    /// Returns an error when either ledger cannot be read or parsed.
    pub fn reload(&mut self) -> Result<()> {
        self.registry.load()?;
        self.history.load()?;
        Ok(())
    }

    /// Resolves the project root owning `path` without registering anything.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures; a path belonging to no project is
    /// `Ok(None)`.
    pub fn resolve_project(&mut self, path: &str) -> Result<Option<String>> {
        let normalized = self.normalize(path);
        self.resolve_normalized(&normalized)
    }

    /// Resolves `path` and, on success, upserts the project into the
    /// registry under its root's base name.
    ///
    /// A name collision with a different root silently adopts the new root;
    /// the most recently resolved project wins.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures and registry persistence failures.
    pub fn try_add_project(&mut self, path: &str) -> Result<Option<String>> {
        let normalized = self.normalize(path);
        let Some(root) = self.resolve_normalized(&normalized)? else {
            tracing::debug!(path = %normalized, "failed to detect a project for path");
            return Ok(None);
        };

        let name = paths::basename(&root);
        self.registry.touch(&name, &root)?;
        Ok(Some(root))
    }

    /// Promotes `name` to most recent, adopting `root` as its current root.
    ///
    /// # Errors
    ///
    /// Propagates registry persistence failures.
    pub fn register_project_access(&mut self, name: &str, root: &str) -> Result<()> {
        let root = self.normalize(root);
        self.registry.touch(name, &root)
    }

    /// Records `path` as the most recently accessed file of project `name`
    /// and saves the recency ledger.
    ///
    /// The ledger is re-read first so external edits survive the save.
    ///
    /// # Errors
    ///
    /// Propagates recency ledger persistence failures.
    pub fn record_file_access(&mut self, name: &str, path: &str) -> Result<()> {
        let path = self.normalize(path);
        self.history.load()?;
        self.history.record(name, &path);
        self.history.save()?;
        Ok(())
    }

    /// Handles a file-open event: registers the owning project and records
    /// the file in its recency history.
    ///
    /// Opening the project ledger itself is ignored, so hand-editing the
    /// project list never registers the home directory's ledger as project
    /// activity.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures and ledger persistence failures.
    pub fn register_file_open(&mut self, path: &str) -> Result<Option<String>> {
        let normalized = self.normalize(path);
        if Path::new(&normalized) == self.registry.ledger_path() {
            return Ok(None);
        }

        let Some(root) = self.try_add_project(&normalized)? else {
            return Ok(None);
        };

        let name = paths::basename(&root);
        self.history.load()?;
        self.history.record(&name, &normalized);
        self.history.save()?;
        Ok(Some(root))
    }

    /// Handles a workspace-folders-added event: registers each folder.
    ///
    /// # Errors
    ///
    /// Propagates the first failure; folders before it are already
    /// registered.
    pub fn register_workspace_folders(&mut self, added: &[String]) -> Result<()> {
        for folder in added {
            self.try_add_project(folder)?;
        }
        Ok(())
    }

    /// Explicitly registers `dir` as a project and notifies the host.
    ///
    /// # Errors
    ///
    /// Propagates registry persistence failures.
    pub fn add_project(&mut self, dir: &str) -> Result<()> {
        let dir = self.normalize(dir);
        let name = paths::basename(&dir);
        self.registry.touch(&name, &dir)?;
        self.host.notify("project added");
        Ok(())
    }

    /// Removes the project named `name`, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Propagates registry persistence failures.
    pub fn remove_project(&mut self, name: &str) -> Result<bool> {
        self.registry.remove(name)
    }

    /// All registered projects as `(name, entry)` pairs, most recent first.
    #[must_use]
    pub fn projects(&self) -> Vec<(&str, &ProjectEntry)> {
        self.registry
            .entries()
            .map(|(name, entry)| (name.as_str(), entry))
            .collect()
    }

    /// Registered project names, most recent first.
    #[must_use]
    pub fn project_names(&self) -> Vec<&str> {
        self.registry.names().map(String::as_str).collect()
    }

    /// Registered projects matching `query`, most recent first.
    ///
    /// The query is matched against both the project name and its root
    /// path; a blank query returns everything.
    #[must_use]
    pub fn filter_projects(&self, query: &str) -> Vec<(&str, &ProjectEntry)> {
        let filter = FuzzyFilter::new(query);
        self.registry
            .entries()
            .filter(|(name, entry)| {
                filter.is_match_all() || filter.matches(name) || filter.matches(&entry.root)
            })
            .map(|(name, entry)| (name.as_str(), entry))
            .collect()
    }

    /// Opens the registered project `name` as a workspace folder and
    /// promotes it, returning whether the name was known.
    ///
    /// # Errors
    ///
    /// Propagates host failures and registry persistence failures.
    pub fn open_project(&mut self, name: &str) -> Result<bool> {
        let Some(root) = self.registry.get(name).map(|entry| entry.root.clone()) else {
            return Ok(false);
        };
        self.host.add_workspace_folder(&root)?;
        self.registry.touch(name, &root)?;
        Ok(true)
    }

    /// The host's open workspace folders as `(name, root)` pairs.
    #[must_use]
    pub fn workspace_projects(&self) -> Vec<(String, String)> {
        self.host
            .workspace_folders()
            .into_iter()
            .map(|root| (paths::basename(&root), root))
            .collect()
    }

    /// Closes the workspace folder rooted at `root`, returning whether one
    /// was open.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn remove_workspace_folder(&mut self, root: &str) -> Result<bool> {
        let root = self.normalize(root);
        self.host.remove_workspace_folder(&root)
    }

    /// Asks the host to open the project ledger for hand-editing.
    ///
    /// # Errors
    ///
    /// Propagates host failures.
    pub fn edit_project_list(&self) -> Result<()> {
        let path = self.registry.ledger_path().to_string_lossy().into_owned();
        self.host.open_file(&path)
    }

    /// Lists the files of the project rooted at `root`, most recently
    /// accessed first.
    ///
    /// The scan skips every entry whose name is excluded: the configured
    /// exclude names, the literal lines collected from the project's
    /// ignore files, and `extra_excludes`, deduplicated. Known files are
    /// served from the descriptor cache, accumulating `root` as an owner;
    /// unknown files enter the cache. Files without a recency rank keep
    /// their scan order after the ranked ones.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures from the scan.
    pub fn list_project_files(
        &mut self,
        root: &str,
        extra_excludes: &[String],
    ) -> Result<Vec<FileItem>> {
        let root = self.normalize(root);
        let _span = tracing::debug_span!("list_project_files", root = %root).entered();

        self.history.load()?;
        let excludes = self.collect_excludes(&root, extra_excludes)?;
        let mut found = Vec::new();
        self.scan_directory(&root, &excludes, &mut found)?;

        let mut items = Vec::with_capacity(found.len());
        for path in found {
            if let Some(item) = self.file_items.get_mut(&path) {
                item.add_owner(&root);
                items.push(item.clone());
            } else {
                let item = FileItem::new(path, &root)?;
                items.push(item.clone());
                self.file_items.insert(item);
            }
        }

        let name = paths::basename(&root);
        if let Some(cache) = self.history.cache(&name) {
            items.sort_by(|a, b| cache.rank(&b.abs_path).cmp(&cache.rank(&a.abs_path)));
        }

        tracing::debug!(root = %root, files = items.len(), "listed project files");
        Ok(items)
    }

    /// Lists the project's files filtered by `query`.
    ///
    /// The query is matched against each file's root-relative label.
    ///
    /// # Errors
    ///
    /// Propagates host I/O failures from the scan.
    pub fn search_project_files(
        &mut self,
        root: &str,
        query: &str,
        extra_excludes: &[String],
    ) -> Result<Vec<FileItem>> {
        let filter = FuzzyFilter::new(query);
        let mut items = self.list_project_files(root, extra_excludes)?;
        items.retain(|item| filter.matches(&item.relative_label));
        Ok(items)
    }

    /// Union of configured excludes, ignore-file lines and ad-hoc extras.
    ///
    /// Ignore files are read literally: lines are trimmed, blank lines and
    /// `#` comments dropped, everything else excluded by exact name.
    fn collect_excludes(&self, root: &str, extra: &[String]) -> Result<BTreeSet<String>> {
        let mut excludes: BTreeSet<String> =
            self.config.project_exclude_names.iter().cloned().collect();

        for ignore_name in &self.config.project_ignore_file_names {
            let ignore_path = paths::join(root, ignore_name);
            if self.host.stat(&ignore_path).is_err() {
                continue;
            }
            let contents = self.host.read_file(&ignore_path)?;
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                excludes.insert(line.to_string());
            }
        }

        excludes.extend(extra.iter().cloned());
        Ok(excludes)
    }

    /// Depth-first scan collecting file paths, in host listing order.
    /// Symlinked directories are listed but not entered.
    fn scan_directory(
        &self,
        dir: &str,
        excludes: &BTreeSet<String>,
        out: &mut Vec<String>,
    ) -> Result<()> {
        for (name, kind) in self.host.read_dir(dir)? {
            if excludes.contains(&name) {
                continue;
            }
            let path = paths::join(dir, &name);
            if kind.is_dir() {
                if !kind.is_symlink() {
                    self.scan_directory(&path, excludes, out)?;
                }
            } else {
                out.push(path);
            }
        }
        Ok(())
    }

    /// Starts a browse flow.
    ///
    /// With `from_file` the browser opens in that file's directory,
    /// otherwise in the host's home directory.
    ///
    /// # Errors
    ///
    /// Propagates listing failures from the starting directory.
    pub fn start_browse(&mut self, mode: BrowseMode, from_file: Option<&str>) -> Result<()> {
        let start = match from_file {
            Some(path) => {
                let normalized = self.normalize(path);
                paths::parent(&normalized).unwrap_or_else(|| self.host.home_dir())
            }
            None => self.host.home_dir(),
        };
        self.browse = Some(BrowseState::open(&self.host, &self.config, mode, &start)?);
        Ok(())
    }

    /// Ends the browse flow, dropping its state.
    pub fn close_browse(&mut self) {
        self.browse = None;
    }

    /// The active browse state, for rendering.
    #[must_use]
    pub fn browse(&self) -> Option<&BrowseState> {
        self.browse.as_ref()
    }

    /// Accepts `path` in the active browse flow.
    ///
    /// Returns `Ok(None)` when no browse flow is active.
    ///
    /// # Errors
    ///
    /// Propagates host failures from descending or opening.
    pub fn browse_accept(&mut self, path: &str) -> Result<Option<Accepted>> {
        match self.browse.as_mut() {
            Some(state) => state.accept(&self.host, path).map(Some),
            None => Ok(None),
        }
    }

    /// Moves the active browse flow to its parent directory.
    pub fn browse_go_up(&mut self) -> Result<()> {
        match self.browse.as_mut() {
            Some(state) => state.go_up(&self.host),
            None => Ok(()),
        }
    }

    /// Moves the active browse flow to the host's home directory.
    pub fn browse_go_home(&mut self) -> Result<()> {
        match self.browse.as_mut() {
            Some(state) => state.go_home(&self.host),
            None => Ok(()),
        }
    }

    /// Moves the active browse flow to the filesystem root.
    pub fn browse_go_root(&mut self) -> Result<()> {
        match self.browse.as_mut() {
            Some(state) => state.go_root(&self.host),
            None => Ok(()),
        }
    }

    /// Flips dot-entry visibility in the active browse flow.
    pub fn browse_toggle_hidden(&mut self) {
        if let Some(state) = self.browse.as_mut() {
            state.toggle_hidden();
        }
    }

    /// Flips the name filter in the active browse flow.
    pub fn browse_toggle_filter(&mut self) {
        if let Some(state) = self.browse.as_mut() {
            state.toggle_filter();
        }
    }

    /// Path of the project ledger file.
    #[must_use]
    pub fn project_ledger_path(&self) -> PathBuf {
        self.registry.ledger_path().to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::testing::ScriptedHost;
    use std::fs;

    // Project roots must really exist for registry reconciliation, so the
    // scripted tree mirrors directories created under a tempdir, and the
    // scripted home is the tempdir itself.
    fn fixture() -> (ScriptedHost, Config, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_string_lossy().into_owned();
        let host = ScriptedHost::new(&home);
        let mut config = Config::default();
        config.project_list_path = Some(dir.path().join("projects.json"));
        config.recent_history_path = Some(dir.path().join("rank.json"));
        (host, config, dir)
    }

    fn add_project_tree(host: &ScriptedHost, dir: &tempfile::TempDir, rel: &str) -> String {
        let root = dir.path().join(rel);
        fs::create_dir_all(&root).unwrap();
        let root = root.to_string_lossy().into_owned();
        host.add_dir(&format!("{root}/.git"));
        root
    }

    #[test]
    fn new_creates_default_ledgers_under_home() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().to_string_lossy().into_owned();
        let host = ScriptedHost::new(&home);

        let session = NavigationSession::new(host, Config::default()).unwrap();

        assert!(dir.path().join(PROJECT_LEDGER_NAME).exists());
        assert!(dir.path().join(HISTORY_LEDGER_NAME).exists());
        assert!(session.projects().is_empty());
    }

    #[test]
    fn try_add_project_registers_under_basename() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "work/app");
        host.add_file(&format!("{root}/src/main.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let resolved = session
            .try_add_project(&format!("{root}/src/main.rs"))
            .unwrap();

        assert_eq!(resolved, Some(root.clone()));
        assert_eq!(session.project_names(), ["app"]);
        let on_disk = fs::read_to_string(dir.path().join("projects.json")).unwrap();
        assert!(on_disk.contains("app"));
    }

    #[test]
    fn resolve_project_registers_nothing() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "work/app");
        host.add_file(&format!("{root}/src/main.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let resolved = session
            .resolve_project(&format!("{root}/src/main.rs"))
            .unwrap();

        assert_eq!(resolved, Some(root));
        assert!(session.projects().is_empty());
    }

    #[test]
    fn try_add_project_returns_none_off_any_project() {
        let (host, config, dir) = fixture();
        let stray = dir.path().join("stray.txt");
        fs::write(&stray, "x").unwrap();
        let stray = stray.to_string_lossy().into_owned();
        host.add_file(&stray);
        let mut session = NavigationSession::new(host, config).unwrap();

        // The only candidate ancestor is home, which the walk never tests.
        assert_eq!(session.try_add_project(&stray).unwrap(), None);
        assert!(session.projects().is_empty());
    }

    #[test]
    fn name_collision_keeps_the_most_recent_root() {
        let (host, config, dir) = fixture();
        let first = add_project_tree(&host, &dir, "x/app");
        let second = add_project_tree(&host, &dir, "y/app");
        host.add_file(&format!("{first}/a.rs"));
        host.add_file(&format!("{second}/b.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        session.try_add_project(&format!("{first}/a.rs")).unwrap();
        session.try_add_project(&format!("{second}/b.rs")).unwrap();

        let projects = session.projects();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].0, "app");
        assert_eq!(projects[0].1.root, second);
    }

    #[test]
    fn register_file_open_records_recency() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "work/app");
        host.add_file(&format!("{root}/a.rs"));
        host.add_file(&format!("{root}/b.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        session.register_file_open(&format!("{root}/a.rs")).unwrap();
        session.register_file_open(&format!("{root}/b.rs")).unwrap();

        let on_disk = fs::read_to_string(dir.path().join("rank.json")).unwrap();
        assert!(on_disk.contains("a.rs"));
        assert!(on_disk.contains("b.rs"));
    }

    #[test]
    fn reload_picks_up_hand_edited_ledgers() {
        let (host, config, dir) = fixture();
        let handmade = add_project_tree(&host, &dir, "handmade");
        let mut session = NavigationSession::new(host, config).unwrap();
        assert!(session.projects().is_empty());

        fs::write(
            dir.path().join("projects.json"),
            format!(r#"{{"handmade": "{handmade}"}}"#),
        )
        .unwrap();

        session.reload().unwrap();
        assert_eq!(session.project_names(), ["handmade"]);
    }

    #[test]
    fn touch_paths_preserve_concurrent_hand_edits() {
        let (host, config, dir) = fixture();
        let mine = add_project_tree(&host, &dir, "mine");
        let theirs = add_project_tree(&host, &dir, "theirs");
        let mut session = NavigationSession::new(host, config).unwrap();
        session.add_project(&mine).unwrap();

        // A human adds a second project directly in the ledger file.
        fs::write(
            dir.path().join("projects.json"),
            format!(r#"{{"theirs": "{theirs}", "mine": "{mine}"}}"#),
        )
        .unwrap();

        session.register_project_access("mine", &mine).unwrap();

        assert_eq!(session.project_names(), ["mine", "theirs"]);
        let on_disk = fs::read_to_string(dir.path().join("projects.json")).unwrap();
        assert!(on_disk.contains("theirs"));
    }

    #[test]
    fn listing_picks_up_hand_edited_recency() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file(&format!("{root}/a.rs"));
        host.add_file(&format!("{root}/b.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        fs::write(
            dir.path().join("rank.json"),
            format!(r#"{{"app": ["{root}/a.rs", "{root}/b.rs"]}}"#),
        )
        .unwrap();

        let items = session.list_project_files(&root, &[]).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.relative_label.as_str()).collect();
        assert_eq!(labels, ["b.rs", "a.rs"]);
    }

    #[test]
    fn register_file_open_skips_the_project_ledger() {
        let (host, config, dir) = fixture();
        let ledger = dir.path().join("projects.json").to_string_lossy().into_owned();
        let mut session = NavigationSession::new(host, config).unwrap();

        let resolved = session.register_file_open(&ledger).unwrap();

        assert_eq!(resolved, None);
        assert!(session.projects().is_empty());
    }

    #[test]
    fn register_workspace_folders_registers_each() {
        let (host, config, dir) = fixture();
        let one = add_project_tree(&host, &dir, "one");
        let two = add_project_tree(&host, &dir, "two");
        host.add_workspace_folder(&one).unwrap();
        host.add_workspace_folder(&two).unwrap();
        let mut session = NavigationSession::new(host, config).unwrap();

        session
            .register_workspace_folders(&[one.clone(), two.clone()])
            .unwrap();

        let mut names = session.project_names();
        names.sort_unstable();
        assert_eq!(names, ["one", "two"]);
    }

    #[test]
    fn add_project_notifies_the_host() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "manual");
        let mut session = NavigationSession::new(host, config).unwrap();

        session.add_project(&root).unwrap();

        assert_eq!(session.project_names(), ["manual"]);
        assert_eq!(session.host().notices(), ["project added"]);
    }

    #[test]
    fn remove_project_forgets_the_entry() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "gone");
        let mut session = NavigationSession::new(host, config).unwrap();
        session.add_project(&root).unwrap();

        assert!(session.remove_project("gone").unwrap());
        assert!(!session.remove_project("gone").unwrap());
        assert!(session.projects().is_empty());
    }

    #[test]
    fn list_project_files_skips_excluded_names() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file(&format!("{root}/README.md"));
        host.add_file(&format!("{root}/src/main.rs"));
        host.add_file(&format!("{root}/node_modules/x/index.js"));
        host.add_file(&format!("{root}/.git/config"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let items = session.list_project_files(&root, &[]).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.relative_label.as_str()).collect();
        assert_eq!(labels, ["README.md", "src/main.rs"]);
    }

    #[test]
    fn list_project_files_honors_ignore_files_and_extras() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file_with(
            &format!("{root}/.gitignore"),
            "dist\n# build output\n\nsecret\n",
        );
        host.add_file(&format!("{root}/dist/out.js"));
        host.add_file(&format!("{root}/secret/key.pem"));
        host.add_file(&format!("{root}/docs/guide.md"));
        host.add_file(&format!("{root}/kept.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let items = session
            .list_project_files(&root, &["docs".to_string()])
            .unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.relative_label.as_str()).collect();
        assert_eq!(labels, [".gitignore", "kept.rs"]);
    }

    #[test]
    fn list_project_files_sorts_by_recency() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file(&format!("{root}/a.rs"));
        host.add_file(&format!("{root}/b.rs"));
        host.add_file(&format!("{root}/c.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        session
            .record_file_access("app", &format!("{root}/b.rs"))
            .unwrap();
        session
            .record_file_access("app", &format!("{root}/c.rs"))
            .unwrap();

        let items = session.list_project_files(&root, &[]).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.relative_label.as_str()).collect();
        assert_eq!(labels, ["c.rs", "b.rs", "a.rs"]);
    }

    #[test]
    fn file_items_accumulate_owning_roots() {
        let (host, config, dir) = fixture();
        let outer = add_project_tree(&host, &dir, "outer");
        let inner = add_project_tree(&host, &dir, "outer/inner");
        host.add_file(&format!("{inner}/shared.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        session.list_project_files(&outer, &[]).unwrap();
        let items = session.list_project_files(&inner, &[]).unwrap();

        let shared = items
            .iter()
            .find(|item| item.display_name == "shared.rs")
            .unwrap();
        assert!(shared.owning_roots.contains(&outer));
        assert!(shared.owning_roots.contains(&inner));
    }

    #[test]
    fn search_project_files_filters_by_relative_label() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file(&format!("{root}/src/main.rs"));
        host.add_file(&format!("{root}/src/lib.rs"));
        host.add_file(&format!("{root}/notes.txt"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let items = session.search_project_files(&root, "main rs", &[]).unwrap();
        let labels: Vec<&str> = items.iter().map(|i| i.relative_label.as_str()).collect();
        assert_eq!(labels, ["src/main.rs"]);
    }

    #[test]
    fn filter_projects_matches_name_or_root() {
        // Seeded through the ledger file so the roots are fixed strings the
        // fuzzy assertions can reason about.
        let (host, config, dir) = fixture();
        fs::write(
            dir.path().join("projects.json"),
            r#"{"web": "/frontend/web", "app": "/services/app"}"#,
        )
        .unwrap();
        let session = NavigationSession::new(host, config).unwrap();

        let by_name: Vec<&str> = session
            .filter_projects("app")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(by_name, ["app"]);

        let by_root: Vec<&str> = session
            .filter_projects("frontend")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(by_root, ["web"]);

        assert_eq!(session.filter_projects("").len(), 2);
    }

    #[test]
    fn open_project_adds_a_workspace_folder_and_promotes() {
        let (host, config, dir) = fixture();
        let app = add_project_tree(&host, &dir, "app");
        let web = add_project_tree(&host, &dir, "web");
        let mut session = NavigationSession::new(host, config).unwrap();
        session.add_project(&app).unwrap();
        session.add_project(&web).unwrap();
        assert_eq!(session.project_names(), ["web", "app"]);

        assert!(session.open_project("app").unwrap());
        assert_eq!(session.host().workspace_folders(), [app.clone()]);
        assert_eq!(session.project_names(), ["app", "web"]);

        assert!(!session.open_project("missing").unwrap());
    }

    #[test]
    fn workspace_projects_pair_names_with_roots() {
        let (host, config, dir) = fixture();
        let app = add_project_tree(&host, &dir, "work/app");
        host.add_workspace_folder(&app).unwrap();
        let mut session = NavigationSession::new(host, config).unwrap();

        assert_eq!(
            session.workspace_projects(),
            [("app".to_string(), app.clone())]
        );
        assert!(session.remove_workspace_folder(&app).unwrap());
        assert!(session.workspace_projects().is_empty());
    }

    #[test]
    fn edit_project_list_opens_the_ledger() {
        let (host, config, dir) = fixture();
        let ledger = dir.path().join("projects.json");
        let session = NavigationSession::new(host, config).unwrap();

        session.edit_project_list().unwrap();

        assert_eq!(
            session.host().opened(),
            [ledger.to_string_lossy().into_owned()]
        );
    }

    #[test]
    fn browse_wrappers_drive_the_active_flow() {
        let (host, config, dir) = fixture();
        let root = add_project_tree(&host, &dir, "app");
        host.add_file(&format!("{root}/src/main.rs"));
        let mut session = NavigationSession::new(host, config).unwrap();

        session
            .start_browse(BrowseMode::Browse, Some(&format!("{root}/src/main.rs")))
            .unwrap();
        assert_eq!(
            session.browse().unwrap().current_dir(),
            format!("{root}/src")
        );

        session.browse_go_up().unwrap();
        assert_eq!(session.browse().unwrap().current_dir(), root);

        let outcome = session.browse_accept(&format!("{root}/src")).unwrap();
        assert_eq!(outcome, Some(Accepted::Descended));

        session.close_browse();
        assert!(session.browse().is_none());
        assert_eq!(session.browse_accept("/anywhere").unwrap(), None);
        session.browse_go_up().unwrap();
    }

    #[test]
    fn start_browse_defaults_to_home() {
        let (host, config, _dir) = fixture();
        let home = host.home_dir();
        let mut session = NavigationSession::new(host, config).unwrap();

        session.start_browse(BrowseMode::ProjectPick, None).unwrap();
        assert_eq!(session.browse().unwrap().current_dir(), home);
    }

    #[test]
    fn paths_are_alias_and_tilde_normalized() {
        let (host, mut config, dir) = fixture();
        let work = add_project_tree(&host, &dir, "work/app");
        host.add_file(&format!("{work}/src/main.rs"));
        let base = dir.path().to_string_lossy().into_owned();
        config
            .path_alias_mappings
            .insert("@w".to_string(), format!("{base}/work"));
        let mut session = NavigationSession::new(host, config).unwrap();

        let via_alias = session.try_add_project("@w/app/src/main.rs").unwrap();
        assert_eq!(via_alias, Some(work.clone()));

        let via_tilde = session
            .resolve_project("~/work/app/src/main.rs")
            .unwrap();
        assert_eq!(via_tilde, Some(work));
    }
}
