//! Cache layer: the two eviction structures and the file-descriptor index.
//!
//! Two deliberately different recency semantics live here:
//!
//! - [`BoundedOrderedMap`]: both reads and writes promote. Backs the project
//!   registry and the file-descriptor cache.
//! - [`RecencyCache`]: only writes promote; reads are pure. Backs per-project
//!   file ranking, where sorting by rank must not disturb the ranks.

pub mod file_items;
pub mod ordered_map;
pub mod recency;

pub use file_items::FileItemCache;
pub use ordered_map::BoundedOrderedMap;
pub use recency::{RecencyCache, ABSENT_RANK};
