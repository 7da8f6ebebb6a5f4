//! Domain layer for the trailhead navigation core.
//!
//! This module contains the core domain types shared across the crate,
//! independent of any host-editor API or storage concern.
//!
//! # Organization
//!
//! - [`error`]: Error types and result alias
//! - [`project`]: Project registry entry
//! - [`file_item`]: Cached file descriptor with owning-root set

pub mod error;
pub mod file_item;
pub mod project;

pub use error::{Result, TrailheadError};
pub use file_item::FileItem;
pub use project::ProjectEntry;
