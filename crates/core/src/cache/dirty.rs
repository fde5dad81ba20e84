//! Dirty-key tracking, orthogonal to the snapshot store.
//!
//! Hosts mark keys dirty when items are edited while their page may still
//! sit in the cache. The marks accumulate in their own namespace and are
//! consumed exactly once, by the next restore.

use crate::store::SessionHash;

/// Namespace holding the dirty-key set.
pub(crate) const DIRTY_NAMESPACE: &str = "pageCache-dirty";

/// Idempotently add `key` to the dirty set.
pub(crate) fn mark(hash: &SessionHash, key: &str) {
    hash.set(DIRTY_NAMESPACE, key, &true);
}

/// Return all dirty keys and clear the set.
///
/// Order follows the enumeration order of the underlying mapping and is not
/// sorted. The namespace is removed with a single clear, not per-key
/// deletes.
pub(crate) fn collect_and_clear(hash: &SessionHash) -> Vec<String> {
    let entries = hash.load(DIRTY_NAMESPACE);
    if entries.is_empty() {
        return Vec::new();
    }

    hash.clear(DIRTY_NAMESPACE);
    entries.into_keys().collect()
}
