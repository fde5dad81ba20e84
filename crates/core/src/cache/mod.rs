//! Snapshot cache engine.
//!
//! A bounded, namespaced key-value cache over a session-scoped store:
//!
//! - Snapshot records with a fixed time-to-live validity window
//! - Recency-bounded eviction (least recently captured goes first)
//! - A dirty-key set consumed on restore to refresh stale items
//! - A lifecycle controller orchestrating capture, validity and restore

mod dirty;
mod eviction;

pub mod controller;
pub mod record;

pub use controller::{CacheEvent, SnapbackCache};
pub use record::SnapshotRecord;
