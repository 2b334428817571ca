//! Wish store adapter: hydration, full-snapshot mirroring, and the visitor id slot.

use leptos::logging;
use platform_host::{new_visitor_id, read_slot_with, write_slot_with, SlotStore};
use serde_json::Value;

use crate::{
    error::WishError,
    model::{WishRecord, VISITOR_ID_SLOT_KEY, WISHES_SLOT_KEY},
};

/// Loads and normalizes stored wishes.
///
/// An absent slot, unparseable JSON, or a non-array document yields an empty list. Individual
/// entries that do not match the record layout are skipped with a warning. Never fails.
pub async fn load_wishes<S: SlotStore + ?Sized>(store: &S) -> Vec<WishRecord> {
    match read_slot_with::<_, Value>(store, WISHES_SLOT_KEY).await {
        Ok(Some(document)) => wishes_from_document(document),
        Ok(None) => Vec::new(),
        Err(err) => {
            logging::warn!("wish store slot could not be read: {err}");
            Vec::new()
        }
    }
}

fn wishes_from_document(document: Value) -> Vec<WishRecord> {
    let Value::Array(entries) = document else {
        logging::warn!("wish store slot is not an array; ignoring it");
        return Vec::new();
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value::<WishRecord>(entry) {
            Ok(record) => Some(record.normalize()),
            Err(err) => {
                logging::warn!("skipping stored wish #{index}: {err}");
                None
            }
        })
        .collect()
}

/// Serializes the full collection the way it is written to the slot.
///
/// # Errors
///
/// Returns [`WishError::Storage`] if serialization fails.
pub fn serialize_wishes(records: &[WishRecord]) -> Result<String, WishError> {
    serde_json::to_string(records).map_err(|err| WishError::Storage(err.to_string()))
}

/// Overwrites the slot with the full collection.
///
/// # Errors
///
/// Returns [`WishError::Storage`] when the store rejects the write (for example a full quota).
pub async fn try_save_wishes<S: SlotStore + ?Sized>(
    store: &S,
    records: &[WishRecord],
) -> Result<(), WishError> {
    write_slot_with(store, WISHES_SLOT_KEY, records)
        .await
        .map_err(WishError::Storage)
}

/// Writes a snapshot already produced by [`serialize_wishes`].
///
/// # Errors
///
/// Returns [`WishError::Storage`] when the store rejects the write.
pub async fn save_serialized_wishes<S: SlotStore + ?Sized>(
    store: &S,
    serialized: &str,
) -> Result<(), WishError> {
    store
        .write_slot(WISHES_SLOT_KEY, serialized)
        .await
        .map_err(WishError::Storage)
}

/// Overwrites the slot with the full collection, logging instead of failing.
pub async fn save_wishes<S: SlotStore + ?Sized>(store: &S, records: &[WishRecord]) {
    if let Err(err) = try_save_wishes(store, records).await {
        logging::warn!("persist wishes failed: {err}");
    }
}

/// Removes the wish slot, logging instead of failing.
pub async fn clear_wishes<S: SlotStore + ?Sized>(store: &S) {
    if let Err(err) = store.remove_slot(WISHES_SLOT_KEY).await {
        logging::warn!("clear wishes failed: {err}");
    }
}

/// Returns the visitor id for this browser profile, creating and storing one on first use.
///
/// When the slot cannot be written the generated id is still returned for the session.
pub async fn load_or_create_visitor_id<S: SlotStore + ?Sized>(store: &S) -> String {
    match store.read_slot(VISITOR_ID_SLOT_KEY).await {
        Ok(Some(existing)) if !existing.trim().is_empty() => return existing,
        Ok(_) => {}
        Err(err) => logging::warn!("visitor id read failed: {err}"),
    }

    let visitor_id = new_visitor_id();
    if let Err(err) = store.write_slot(VISITOR_ID_SLOT_KEY, &visitor_id).await {
        logging::warn!("visitor id write failed: {err}");
    }
    visitor_id
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;
    use platform_host::MemorySlotStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{AttachmentKind, MediaItem, MediaKind, WishId};

    fn record(id: &str, items: Vec<MediaItem>) -> WishRecord {
        WishRecord::new(
            WishId::from(id),
            "Dee",
            Some(format!("wish {id}")),
            items,
            Utc.timestamp_millis_opt(1_710_000_000_000)
                .single()
                .expect("timestamp"),
        )
    }

    #[test]
    fn missing_corrupt_and_non_array_slots_load_empty() {
        let store = MemorySlotStore::default();
        assert!(block_on(load_wishes(&store)).is_empty());

        store.seed(WISHES_SLOT_KEY, "{not json");
        assert!(block_on(load_wishes(&store)).is_empty());

        store.seed(WISHES_SLOT_KEY, r#"{"id":"a"}"#);
        assert!(block_on(load_wishes(&store)).is_empty());
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let store = MemorySlotStore::default();
        let photo = MediaItem {
            kind: AttachmentKind::Photo,
            url: "data:image/png;base64,AA==".into(),
        };
        let records = vec![record("new", vec![photo]), record("old", Vec::new())];

        block_on(try_save_wishes(&store, &records)).expect("save");
        assert_eq!(block_on(load_wishes(&store)), records);
    }

    #[test]
    fn malformed_entries_are_skipped_and_kinds_recomputed() {
        let store = MemorySlotStore::default();
        store.seed(
            WISHES_SLOT_KEY,
            r#"[
                {"id":"1","sender_name":"A","message":"hi","media_type":"photo","media_urls":[],"created_at":"2024-01-01T00:00:00.000Z"},
                {"id":"2","message":"missing name"},
                {"id":"3","sender_name":"C","message":null,"media_type":null,"media_urls":[{"type":"voice","url":"data:audio/webm;base64,AA=="}],"created_at":"2024-01-02T00:00:00Z"}
            ]"#,
        );

        let loaded = block_on(load_wishes(&store));
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].media_kind, MediaKind::Text);
        assert!(loaded[0].media_items.is_empty());
        assert_eq!(loaded[1].media_kind, MediaKind::Voice);
    }

    #[test]
    fn quota_fault_is_reported_and_previous_snapshot_survives() {
        let store = MemorySlotStore::with_quota(600);
        let first = vec![record("a", Vec::new())];
        block_on(try_save_wishes(&store, &first)).expect("first save fits");

        let big = MediaItem {
            kind: AttachmentKind::Photo,
            url: format!("data:image/png;base64,{}", "A".repeat(1_000)),
        };
        let second = vec![record("b", vec![big]), record("a", Vec::new())];
        let err = block_on(try_save_wishes(&store, &second)).expect_err("over quota");
        assert!(matches!(err, WishError::Storage(reason) if reason.contains("quota")));

        block_on(save_wishes(&store, &second));
        assert_eq!(block_on(load_wishes(&store)), first);
    }

    #[test]
    fn clear_removes_the_slot() {
        let store = MemorySlotStore::default();
        block_on(save_wishes(&store, &[record("a", Vec::new())]));
        block_on(clear_wishes(&store));
        assert_eq!(store.peek(WISHES_SLOT_KEY), None);
    }

    #[test]
    fn visitor_id_is_created_once_and_reused() {
        let store = MemorySlotStore::default();
        let first = block_on(load_or_create_visitor_id(&store));
        let second = block_on(load_or_create_visitor_id(&store));
        assert_eq!(first, second);
        assert_eq!(store.peek(VISITOR_ID_SLOT_KEY), Some(first.clone()));
        assert!(first.contains('-'));
    }
}
