//! Cache lifecycle controller.
//!
//! [`SnapbackCache`] owns the read/write lifecycle of both namespaces and is
//! the only component with externally visible operations: capture before
//! navigation, validity check, restore on return, dirty marking and the
//! enable/disable gate.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::broadcast;

use crate::config::CacheSettings;
use crate::page::PageSurface;
use crate::store::{SessionHash, SessionStore};

use super::record::{self, SnapshotRecord};
use super::{dirty, eviction};

/// Namespace holding page snapshots, keyed by page identity.
pub(crate) const PAGE_NAMESPACE: &str = "pageCache";

/// Notifications published by [`SnapbackCache`].
///
/// Events fire strictly after the store mutation they describe.
#[derive(Debug, Clone)]
pub enum CacheEvent {
    /// A snapshot was written.
    Cached(SnapshotRecord),

    /// A snapshot was restored and consumed.
    Loaded(SnapshotRecord),
}

/// Session-scoped page snapshot cache.
///
/// Each instance carries its own configuration, enabled flag and injected
/// capabilities; independent instances do not interfere. All state lives in
/// the session store, re-read on every operation.
pub struct SnapbackCache {
    settings: CacheSettings,
    body_selector: String,
    page: Arc<dyn PageSurface>,
    hash: SessionHash,
    enabled: AtomicBool,
    events: broadcast::Sender<CacheEvent>,
}

impl SnapbackCache {
    /// Create a cache with default settings.
    ///
    /// `body_selector` identifies the fragment to capture and restore.
    pub fn new(
        body_selector: impl Into<String>,
        store: Arc<dyn SessionStore>,
        page: Arc<dyn PageSurface>,
    ) -> Self {
        Self::with_settings(body_selector, store, page, CacheSettings::default())
    }

    /// Create a cache with explicit settings.
    pub fn with_settings(
        body_selector: impl Into<String>,
        store: Arc<dyn SessionStore>,
        page: Arc<dyn PageSurface>,
        settings: CacheSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            settings,
            body_selector: body_selector.into(),
            page,
            hash: SessionHash::new(store),
            enabled: AtomicBool::new(true),
            events,
        }
    }

    /// Subscribe to [`CacheEvent`] notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Re-enable the cache after a [`disable`](Self::disable).
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Disable the cache: validity is forced false and capture/restore
    /// degrade to their miss paths until re-enabled.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Whether the cache can operate: backing store available and enabled.
    pub fn supported(&self) -> bool {
        self.enabled.load(Ordering::Relaxed) && self.hash.available()
    }

    /// Capture the current page fragment into the cache.
    ///
    /// Lets pending transitions finish, waits out the settle delay, then
    /// snapshots the fragment (optionally excluding the sub-region matched
    /// by `exclude`) together with title, scroll offsets, timestamp and the
    /// host's pagination cursor. The write is keyed by the current page
    /// identity and trims the namespace first.
    ///
    /// Returns the record written, or `None` when unsupported. The record
    /// does not exist until the returned future resolves.
    pub async fn capture(&self, exclude: Option<&str>) -> Option<SnapshotRecord> {
        if !self.supported() {
            return None;
        }

        self.page.finish_transitions();
        // give transitions/animations a chance to finish before reading
        tokio::time::sleep(self.settings.settle()).await;

        self.page.remove_autofocus();

        let body = self.page.capture_fragment(&self.body_selector, exclude);
        let (position_x, position_y) = self.page.scroll_offsets();
        let record = SnapshotRecord {
            body,
            title: self.page.title(),
            position_x,
            position_y,
            cached_at: record::now_ms(),
            next_page_offset: self.page.next_page_offset(),
        };

        let key = self.page.location();
        eviction::trim(&self.hash, PAGE_NAMESPACE, self.settings.max_entries);
        self.hash.set(PAGE_NAMESPACE, &key, &record);
        tracing::debug!("cached page fragment for {key}");

        let _ = self.events.send(CacheEvent::Cached(record.clone()));
        Some(record)
    }

    /// Whether a fresh snapshot exists for the current page identity.
    ///
    /// The single predicate gating both autofocus suppression and restore:
    /// supported, record present, and within the TTL window.
    pub fn is_cache_valid(&self) -> bool {
        if !self.supported() {
            return false;
        }

        self.hash
            .get::<SnapshotRecord>(PAGE_NAMESPACE, &self.page.location())
            .is_some_and(|record| record.is_fresh(record::now_ms(), self.settings.ttl_ms))
    }

    /// Restore the cached fragment for the current page identity.
    ///
    /// On a hit: replaces the fragment contents, scrolls back to the
    /// recorded offsets after a minimal deferral, consumes the record (a
    /// second restore misses), then hands any pending dirty keys to the
    /// host's refresh hook.
    ///
    /// Returns the restored record, or `None` on a miss (absent, expired,
    /// or unsupported) with nothing touched.
    pub async fn restore(&self) -> Option<SnapshotRecord> {
        if !self.is_cache_valid() {
            tracing::debug!("cache miss for {}", self.page.location());
            return None;
        }

        let key = self.page.location();
        let record: SnapshotRecord = self.hash.get(PAGE_NAMESPACE, &key)?;

        self.page.replace_fragment(&self.body_selector, &record.body);
        self.page.remove_autofocus();

        // some hosts re-run autofocus during content insertion, which would
        // fight the scroll restore
        tokio::time::sleep(self.settings.scroll_defer()).await;
        self.page.scroll_to(record.position_x, record.position_y);

        // pop: a restored snapshot is consumed
        self.hash.remove(PAGE_NAMESPACE, &key);
        tracing::debug!("cache hit for {key}");

        let _ = self.events.send(CacheEvent::Loaded(record.clone()));

        let dirties = dirty::collect_and_clear(&self.hash);
        if !dirties.is_empty() {
            self.page.refresh_items(&dirties);
        }

        Some(record)
    }

    /// Delete any snapshot stored for `key`. No-op when absent.
    pub fn remove(&self, key: &str) {
        self.hash.remove(PAGE_NAMESPACE, key);
    }

    /// Mark `key` as needing refresh after the next restore.
    pub fn mark_dirty(&self, key: &str) {
        dirty::mark(&self.hash, key);
    }

    /// Strip autofocus when the current page is about to be served from
    /// cache. Hosts call this at document-ready, ahead of `restore`.
    pub fn suppress_autofocus_if_restoring(&self) {
        if self.is_cache_valid() {
            self.page.remove_autofocus();
        }
    }
}
