//! Session-scoped page snapshot cache.
//!
//! Captures a rendered page fragment (markup, title, scroll position,
//! timestamp) before navigation and restores it when the user returns,
//! avoiding a full reload. This crate provides:
//!
//! - A namespaced key-value store over an injected session store
//! - Snapshot records with TTL validity and recency-bounded eviction
//! - A dirty-key set for refreshing items edited while cached
//! - Configuration structures
//!
//! DOM concerns stay on the host side of the [`PageSurface`] seam; the
//! engine treats a fragment as an opaque capture record.

pub mod cache;
pub mod config;
pub mod page;
pub mod store;

pub use cache::{CacheEvent, SnapbackCache, SnapshotRecord};
pub use config::CacheSettings;
pub use page::PageSurface;
pub use store::{MemoryStore, SessionHash, SessionStore};
