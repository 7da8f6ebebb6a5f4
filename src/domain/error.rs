//! Error types for the trailhead navigation core.
//!
//! This module defines the centralized error type [`TrailheadError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Absence is not an error here: lookups that can legitimately miss (project
//! resolution, cache reads) return `Ok(None)` rather than an error variant, and
//! ledger entries that no longer exist on disk are pruned silently during
//! reconciliation.

use thiserror::Error;

/// The main error type for trailhead operations.
///
/// This enum consolidates all error conditions that can occur while resolving
/// projects, browsing directories, or persisting the on-disk ledgers. Most variants
/// carry a description string; I/O errors convert automatically via `#[from]`.
///
/// # Examples
///
/// ```
/// use trailhead::TrailheadError;
///
/// fn require_absolute(path: &str) -> Result<(), TrailheadError> {
///     if path.starts_with('/') {
///         Ok(())
///     } else {
///         Err(TrailheadError::InvalidPath(path.to_string()))
///     }
/// }
///
/// assert!(require_absolute("relative/path").is_err());
/// ```
#[derive(Debug, Error)]
pub enum TrailheadError {
    /// Ledger read, parse, or serialization failed.
    ///
    /// Occurs when one of the on-disk JSON ledgers cannot be parsed or its
    /// in-memory state cannot be serialized. The string describes what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A path was relative where an absolute path is required.
    ///
    /// File descriptors, browse items, and browse targets all refuse relative
    /// paths at construction time. The string is the offending path.
    #[error("Invalid path (not absolute): {0}")]
    InvalidPath(String),

    /// The host adapter reported a failure.
    ///
    /// Occurs when an editor-host operation (stat, directory listing, workspace
    /// mutation) fails for a reason other than plain I/O. The string contains
    /// details from the host.
    #[error("Host error: {0}")]
    Host(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when a configuration file or map cannot be parsed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for trailhead operations.
///
/// This is a type alias for `std::result::Result<T, TrailheadError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, TrailheadError>;
