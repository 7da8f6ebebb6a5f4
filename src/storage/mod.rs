//! Storage layer for the persisted navigation ledgers.
//!
//! This module owns everything that touches the two on-disk JSON ledgers:
//! the project list and the per-project file recency log. Both files are
//! plain JSON that a user may edit by hand; change detection is content-hash
//! based and writes are atomic.
//!
//! # Modules
//!
//! - `ledger`: One ledger file with hash-gated read/write
//! - `registry`: Bounded access-ordered project registry (ledger 1)
//! - `history`: Per-project file recency caches (ledger 2)

pub mod history;
pub mod ledger;
pub mod registry;

pub use history::RecentHistoryLedger;
pub use ledger::LedgerFile;
pub use registry::ProjectRegistry;
