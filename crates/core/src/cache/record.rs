//! Snapshot record shape and freshness rule.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A captured page fragment.
///
/// Field names serialize in camelCase so the persisted layout is stable:
/// one `pageCache` entry is the JSON-stringified form of this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRecord {
    /// Opaque serialized fragment; content is the host's concern.
    pub body: String,

    /// Document title at capture time.
    pub title: String,

    /// Horizontal scroll offset at capture time.
    pub position_x: i64,

    /// Vertical scroll offset at capture time.
    pub position_y: i64,

    /// Capture timestamp, wall-clock milliseconds.
    pub cached_at: i64,

    /// Host-supplied pagination cursor, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_offset: Option<Value>,
}

impl SnapshotRecord {
    /// Whether this record is still valid for restore at `now_ms`.
    ///
    /// The window is strict: a record is fresh while `now - cached_at` is
    /// less than `ttl_ms` and stale at exactly `ttl_ms`.
    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        now_ms - self.cached_at < ttl_ms
    }
}

/// Current wall-clock time in milliseconds.
pub(crate) fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL_MS: i64 = 900_000;

    fn make_test_record(cached_at: i64) -> SnapshotRecord {
        SnapshotRecord {
            body: "<p>hello</p>".to_string(),
            title: "Test".to_string(),
            position_x: 0,
            position_y: 120,
            cached_at,
            next_page_offset: None,
        }
    }

    #[test]
    fn test_fresh_within_ttl() {
        let record = make_test_record(1_000_000);
        assert!(record.is_fresh(1_000_000, TTL_MS));
        assert!(record.is_fresh(1_000_000 + TTL_MS - 1, TTL_MS));
    }

    #[test]
    fn test_stale_at_exact_ttl() {
        let record = make_test_record(1_000_000);
        assert!(!record.is_fresh(1_000_000 + TTL_MS, TTL_MS));
        assert!(!record.is_fresh(1_000_000 + TTL_MS + 1, TTL_MS));
    }

    #[test]
    fn test_serializes_camel_case() {
        let record = make_test_record(42);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["cachedAt"], 42);
        assert_eq!(json["positionX"], 0);
        assert_eq!(json["positionY"], 120);
        assert!(json.get("nextPageOffset").is_none());
        assert!(json.get("cached_at").is_none());
    }

    #[test]
    fn test_round_trips_pagination_cursor() {
        let mut record = make_test_record(42);
        record.next_page_offset = Some(serde_json::json!({ "page": 3 }));

        let raw = serde_json::to_string(&record).unwrap();
        let back: SnapshotRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_deserializes_without_cursor_field() {
        let raw = r#"{"body":"<p>x</p>","title":"T","positionX":1,"positionY":2,"cachedAt":3}"#;
        let record: SnapshotRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.next_page_offset, None);
        assert_eq!(record.cached_at, 3);
    }
}
