//! Recency-bounded eviction for the snapshot namespace.

use crate::store::SessionHash;

use super::record::SnapshotRecord;

/// Trim `namespace` so an incoming write stays within `max_entries`.
///
/// Called before every snapshot write. When the namespace already holds
/// `max_entries` or more, the entries are ordered by capture time and all
/// but the `max_entries - 1` most recent are dropped, making room for the
/// incoming record. Recency is capture time only; restores consume their
/// record instead of re-dating it.
///
/// Entries whose value no longer parses rank oldest, so dead weight is
/// evicted first. Equal capture times keep no particular order.
pub(crate) fn trim(hash: &SessionHash, namespace: &str, max_entries: usize) {
    let mut entries = hash.load(namespace);
    if entries.len() < max_entries {
        return;
    }

    let mut by_age: Vec<(String, i64)> = entries
        .iter()
        .map(|(key, raw)| {
            let cached_at = serde_json::from_str::<SnapshotRecord>(raw)
                .map(|record| record.cached_at)
                .unwrap_or(0);
            (key.clone(), cached_at)
        })
        .collect();

    // most recent first
    by_age.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    let keep = max_entries.saturating_sub(1);
    for (key, _) in &by_age[keep..] {
        entries.remove(key);
    }

    tracing::debug!(
        "evicted {} entries from {namespace}, {} retained",
        by_age.len() - keep,
        entries.len()
    );
    hash.save(namespace, &entries);
}
