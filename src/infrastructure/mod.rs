//! Infrastructure layer for filesystem path handling.
//!
//! All paths in the navigation core are plain strings; this module owns the
//! string-path helpers shared by the resolver, the registries and the browse
//! component.

pub mod paths;

pub use paths::{
    apply_aliases, basename, ensure_trailing_sep, expand_tilde, is_absolute, join, parent,
    relative_to,
};
