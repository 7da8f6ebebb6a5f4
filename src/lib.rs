//! Trailhead: project resolution and recency-ranked file navigation for
//! editor hosts.
//!
//! Trailhead is the navigation core an editor plugs its picker UI into:
//! - Automatic project discovery from file-open and workspace events
//! - Multi-tier project-root resolution with marker-file fallback
//! - Recency-ranked project and file lists backed by bounded caches
//! - Persistent state in two JSON ledgers with content-hash write gating
//! - Host-agnostic directory browsing with visibility toggles
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Embedding host (editor plugin, picker UI, tool)    │  ← Host impl
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session Layer (session/, browse/, search/)         │  ← Entry point
//! │  - Event registration                               │  ← Business logic
//! │  - Project operations                               │
//! │  - Directory browsing + fuzzy filtering             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Resolution    │   │ Storage Layer │   │ Cache Layer   │
//! │ (resolver/)   │   │ (storage/)    │   │ (cache/)      │
//! │ - Tier chain  │   │ - JSON ledgers│   │ - LRU map     │
//! │ - Marker walk │   │ - Hash gating │   │ - Recency     │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Path helpers (infrastructure/)                   │
//! │  - Error types (domain/error)                       │
//! │  - Project and file models (domain/)                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`session`]: The [`NavigationSession`] context object hosts talk to
//! - [`resolver`]: Multi-tier project-root resolution
//! - [`storage`]: JSON ledger persistence with change detection
//! - [`cache`]: Bounded insertion-ordered and recency-ranked structures
//! - [`browse`]: Directory listing state for picker UIs
//! - [`search`]: Tokenized fuzzy query matching
//! - [`host`]: The [`Host`] trait and the native filesystem implementation
//! - [`domain`]: Core types (projects, file descriptors, errors)
//! - [`infrastructure`]: Path string utilities
//! - [`observability`]: Optional tracing subscriber setup
//!
//! # Project Resolution
//!
//! Mapping a path to its owning project tries four tiers in order, cheapest
//! first:
//!
//! 1. The bounded file-descriptor cache (previously resolved files)
//! 2. The host's open workspace folders
//! 3. Registered projects, scanned in recency order by path prefix
//! 4. An upward walk testing each ancestor for marker entries (`.git`,
//!    `Cargo.toml`, ...) that stops short of `/` and the home directory
//!
//! Registration re-ranks the resolved project, and both project and file
//! recency survive restarts through the ledgers.
//!
//! # Example
//!
//! ```no_run
//! use trailhead::host::NativeHost;
//! use trailhead::{Config, NavigationSession};
//!
//! let mut session = NavigationSession::new(NativeHost::new(), Config::default())?;
//!
//! // Forward editor events.
//! session.register_file_open("/work/app/src/main.rs")?;
//!
//! // Drive a picker.
//! for (name, entry) in session.filter_projects("ap") {
//!     println!("{name} ({}) {}", entry.time_ago(), entry.root);
//! }
//! let files = session.list_project_files("/work/app", &[])?;
//! # Ok::<(), trailhead::TrailheadError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Recency Over Frequency
//!
//! Both ledgers rank by recency alone: the project registry is an
//! access-ordered bounded map, and file ranks move only when a file is
//! re-opened. No visit counts, no decay math; the most recently used thing
//! is always first.
//!
//! ## Hash-Gated Persistence
//!
//! Ledger writes compare a content hash before touching disk, so event
//! storms that change nothing cost nothing, and hand-edited ledger files
//! are reloaded instead of clobbered.
//!
//! ## Hosts Stay Outside
//!
//! All editor specifics live behind the [`Host`] trait. The crate never
//! renders, never watches the filesystem, and never installs global state;
//! two sessions over different homes coexist in one process.

#![allow(clippy::multiple_crate_versions)]

pub mod browse;
pub mod cache;
pub mod domain;
pub mod host;
pub mod infrastructure;
pub mod observability;
pub mod resolver;
pub mod search;
pub mod session;
pub mod storage;

pub use browse::{Accepted, BrowseItem, BrowseMode, BrowseState};
pub use cache::{BoundedOrderedMap, FileItemCache, RecencyCache};
pub use domain::{FileItem, ProjectEntry, Result, TrailheadError};
pub use host::{FileKind, Host, NativeHost};
pub use session::NavigationSession;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Navigation configuration.
///
/// Every knob has a usable default. Hosts typically override a handful of
/// entries from their own settings surface via [`Config::from_map`], or
/// load a TOML file via [`Config::from_file`].
///
/// # Example
///
/// ```toml
/// # ~/.config/trailhead.toml
/// marker_file_names = [".git", "Cargo.toml", "go.mod"]
/// project_exclude_names = ["node_modules", "target"]
/// hide_dot_files = true
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Entry names whose presence marks a directory as a project root.
    ///
    /// Consulted by the fourth resolution tier, the upward marker walk.
    /// Default covers the common version-control directories and
    /// per-language manifests.
    pub marker_file_names: Vec<String>,

    /// Entry names skipped entirely during project file scans.
    ///
    /// Matching is by exact name, applied to files and directories alike.
    /// Default: `node_modules`, `target`, `.git`, `dist`, `build`,
    /// `__pycache__`, `.cache`.
    pub project_exclude_names: Vec<String>,

    /// Ignore-file names read at each project root before a scan.
    ///
    /// Their lines extend [`project_exclude_names`](Self::project_exclude_names)
    /// literally; no glob syntax. Default: `.gitignore`, `.ignore`.
    pub project_ignore_file_names: Vec<String>,

    /// Entry names the browser's filter toggle hides.
    ///
    /// The toggle starts enabled only when this list is non-empty.
    /// Default: empty.
    pub browse_filter_names: Vec<String>,

    /// Path prefix aliases, rewritten before every path lookup.
    ///
    /// One rewrite per path, longest alias first, component boundaries
    /// respected. Default: empty.
    pub path_alias_mappings: BTreeMap<String, String>,

    /// Whether browse listings start with dot-entries hidden. Default: true.
    pub hide_dot_files: bool,

    /// Most projects the registry retains; the least recent beyond this
    /// are evicted. Default: 100.
    pub project_capacity: usize,

    /// Most file descriptors cached across all projects. Default: 200.
    pub file_item_cache_capacity: usize,

    /// Most recent files remembered per project. Default: 50.
    pub recent_files_per_project: usize,

    /// Project ledger location. Default: `.project-manager.json` under the
    /// host's home directory.
    pub project_list_path: Option<PathBuf>,

    /// Recency ledger location. Default: `.project-manager-rank.json` under
    /// the host's home directory.
    pub recent_history_path: Option<PathBuf>,

    /// Level filter for [`observability::init_tracing`].
    ///
    /// Accepts a level name (`trace`, `debug`, `info`, `warn`, `error`) or
    /// a full `EnvFilter` directive. Default: `"info"` at initialization.
    pub trace_level: Option<String>,
}

fn default_marker_file_names() -> Vec<String> {
    [
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        "_darcs",
        ".projectile",
        "Cargo.toml",
        "go.mod",
        "package.json",
        "pyproject.toml",
        "Makefile",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_project_exclude_names() -> Vec<String> {
    [
        "node_modules",
        "target",
        ".git",
        "dist",
        "build",
        "__pycache__",
        ".cache",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_project_ignore_file_names() -> Vec<String> {
    [".gitignore", ".ignore"].into_iter().map(String::from).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_file_names: default_marker_file_names(),
            project_exclude_names: default_project_exclude_names(),
            project_ignore_file_names: default_project_ignore_file_names(),
            browse_filter_names: Vec::new(),
            path_alias_mappings: BTreeMap::new(),
            hide_dot_files: true,
            project_capacity: 100,
            file_item_cache_capacity: 200,
            recent_files_per_project: 50,
            project_list_path: None,
            recent_history_path: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host's string-to-string settings map.
    ///
    /// Editor hosts tend to hand settings over as flat string maps; this
    /// constructor extracts and parses typed values with fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - List values are comma-separated; empty items are filtered, and an
    ///   entirely empty list falls back to the default
    /// - `path_alias_mappings` takes comma-separated `alias=target` pairs;
    ///   malformed pairs are skipped
    /// - Capacities parse as integers; unparseable or zero values fall back
    ///   to the default
    /// - `hide_dot_files` parses as a boolean, defaulting to true
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use trailhead::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("marker_file_names".to_string(), ".git,.hg".to_string());
    /// map.insert("project_capacity".to_string(), "25".to_string());
    /// map.insert("path_alias_mappings".to_string(), "@w=/work".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.marker_file_names, vec![".git", ".hg"]);
    /// assert_eq!(config.project_capacity, 25);
    /// assert_eq!(config.path_alias_mappings["@w"], "/work");
    /// ```
    #[must_use]
    pub fn from_map(config: &BTreeMap<String, String>) -> Self {
        let path_alias_mappings = config
            .get("path_alias_mappings")
            .map(|s| {
                s.split(',')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(alias, target)| (alias.trim().to_string(), target.trim().to_string()))
                    .filter(|(alias, target)| !alias.is_empty() && !target.is_empty())
                    .collect::<BTreeMap<_, _>>()
            })
            .unwrap_or_default();

        Self {
            marker_file_names: list_value(config, "marker_file_names")
                .unwrap_or_else(default_marker_file_names),
            project_exclude_names: list_value(config, "project_exclude_names")
                .unwrap_or_else(default_project_exclude_names),
            project_ignore_file_names: list_value(config, "project_ignore_file_names")
                .unwrap_or_else(default_project_ignore_file_names),
            browse_filter_names: list_value(config, "browse_filter_names").unwrap_or_default(),
            path_alias_mappings,
            hide_dot_files: config
                .get("hide_dot_files")
                .and_then(|s| s.parse::<bool>().ok())
                .unwrap_or(true),
            project_capacity: capacity_value(config, "project_capacity", 100),
            file_item_cache_capacity: capacity_value(config, "file_item_cache_capacity", 200),
            recent_files_per_project: capacity_value(config, "recent_files_per_project", 50),
            project_list_path: config.get("project_list_path").map(PathBuf::from),
            recent_history_path: config.get("recent_history_path").map(PathBuf::from),
            trace_level: config.get("trace_level").cloned(),
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// Missing keys keep their defaults, so a partial file is fine.
    ///
    /// # Errors
    ///
    /// Returns [`TrailheadError::Config`] when the file cannot be read or
    /// parsed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use trailhead::Config;
    ///
    /// let config = Config::from_file("/home/u/.config/trailhead.toml")?;
    /// # Ok::<(), trailhead::TrailheadError>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| TrailheadError::Config(format!("failed to read config file: {e}")))?;

        toml::from_str(&contents)
            .map_err(|e| TrailheadError::Config(format!("failed to parse config TOML: {e}")))
    }
}

fn list_value(config: &BTreeMap<String, String>, key: &str) -> Option<Vec<String>> {
    config
        .get(key)
        .map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .filter(|items: &Vec<String>| !items.is_empty())
}

fn capacity_value(config: &BTreeMap<String, String>, key: &str, default: usize) -> usize {
    config
        .get(key)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n != 0)
        .unwrap_or(default)
}

/// Initializes tracing per the config and opens a session over `host`.
///
/// Convenience for hosts without their own subscriber; hosts that manage
/// tracing themselves call [`NavigationSession::new`] directly.
///
/// # Errors
///
/// Returns an error when either ledger cannot be read or created.
///
/// # Example
///
/// ```no_run
/// use trailhead::host::NativeHost;
/// use trailhead::{initialize, Config};
///
/// let session = initialize(NativeHost::new(), Config::default())?;
/// # drop(session);
/// # Ok::<(), trailhead::TrailheadError>(())
/// ```
pub fn initialize<H: Host>(host: H, config: Config) -> Result<NavigationSession<H>> {
    observability::init_tracing(&config);
    tracing::debug!("initializing trailhead session");
    NavigationSession::new(host, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_self_consistent() {
        let config = Config::default();
        assert!(config.marker_file_names.contains(&".git".to_string()));
        assert!(config
            .project_exclude_names
            .contains(&"node_modules".to_string()));
        assert!(config.browse_filter_names.is_empty());
        assert!(config.hide_dot_files);
        assert_eq!(config.project_capacity, 100);
        assert_eq!(config.file_item_cache_capacity, 200);
        assert_eq!(config.recent_files_per_project, 50);
        assert!(config.project_list_path.is_none());
        assert!(config.recent_history_path.is_none());
    }

    #[test]
    fn from_map_parses_lists_and_aliases() {
        let mut map = BTreeMap::new();
        map.insert(
            "marker_file_names".to_string(),
            " .git , Cargo.toml ,".to_string(),
        );
        map.insert(
            "path_alias_mappings".to_string(),
            "@w=/work, broken, @p=/projects".to_string(),
        );
        map.insert("hide_dot_files".to_string(), "false".to_string());
        map.insert(
            "project_list_path".to_string(),
            "/tmp/list.json".to_string(),
        );

        let config = Config::from_map(&map);
        assert_eq!(config.marker_file_names, vec![".git", "Cargo.toml"]);
        assert_eq!(config.path_alias_mappings.len(), 2);
        assert_eq!(config.path_alias_mappings["@w"], "/work");
        assert_eq!(config.path_alias_mappings["@p"], "/projects");
        assert!(!config.hide_dot_files);
        assert_eq!(
            config.project_list_path,
            Some(PathBuf::from("/tmp/list.json"))
        );
    }

    #[test]
    fn from_map_falls_back_on_bad_values() {
        let mut map = BTreeMap::new();
        map.insert("project_capacity".to_string(), "zero".to_string());
        map.insert("recent_files_per_project".to_string(), "0".to_string());
        map.insert("marker_file_names".to_string(), " , ,".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.project_capacity, 100);
        assert_eq!(config.recent_files_per_project, 50);
        assert_eq!(config.marker_file_names, default_marker_file_names());
    }

    #[test]
    fn from_file_round_trips_partial_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trailhead.toml");
        fs::write(
            &path,
            r#"
marker_file_names = [".git"]
project_capacity = 7
trace_level = "debug"
"#,
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.marker_file_names, vec![".git"]);
        assert_eq!(config.project_capacity, 7);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        // Unset keys keep their defaults.
        assert_eq!(config.recent_files_per_project, 50);
    }

    #[test]
    fn from_file_reports_unreadable_and_invalid_files() {
        assert!(matches!(
            Config::from_file("/does/not/exist.toml"),
            Err(TrailheadError::Config(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "marker_file_names = not-a-list").unwrap();
        assert!(matches!(
            Config::from_file(&path),
            Err(TrailheadError::Config(_))
        ));
    }
}
