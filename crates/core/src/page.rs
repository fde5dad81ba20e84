//! Page surface collaborator contract.
//!
//! The cache engine never touches a document directly; it talks to the host
//! through this trait. Required methods cover page identity, fragment
//! capture/replacement and scroll position. The provided defaults are the
//! optional hooks a host may override: finishing in-flight transitions
//! before capture, stripping autofocus attributes, refreshing items marked
//! dirty while cached, and stashing a pagination cursor.

use serde_json::Value;

/// Host-side capability for capturing and restoring a page fragment.
pub trait PageSurface: Send + Sync {
    /// Identity of the current page, used as the cache key (e.g. the URL).
    fn location(&self) -> String;

    /// Current document title.
    fn title(&self) -> String;

    /// Serialize the fragment under `selector`, optionally dropping the
    /// sub-region matched by `exclude` from the capture.
    fn capture_fragment(&self, selector: &str, exclude: Option<&str>) -> String;

    /// Replace the contents of the fragment under `selector` with `html`.
    fn replace_fragment(&self, selector: &str, html: &str);

    /// Current scroll offsets as `(x, y)`.
    fn scroll_offsets(&self) -> (i64, i64);

    /// Scroll the viewport to the given offsets.
    fn scroll_to(&self, x: i64, y: i64);

    /// Let in-flight transitions and animations complete before capture, so
    /// the fragment is not serialized in an in-between state.
    fn finish_transitions(&self) {}

    /// Strip attributes that would steal focus. Called before capture and
    /// before restore; autofocus fires during content insertion on some
    /// hosts and fights the scroll restore.
    fn remove_autofocus(&self) {}

    /// Pagination cursor to stash alongside the snapshot, if the host
    /// paginates the cached fragment.
    fn next_page_offset(&self) -> Option<Value> {
        None
    }

    /// Refresh items that were edited while their page sat in the cache.
    /// Receives the dirty keys collected on restore.
    fn refresh_items(&self, _keys: &[String]) {}
}
