//! Drains reducer-emitted collection effects in order.

use leptos::*;
use platform_host::SlotStore;

use crate::{
    collection::{CollectionEffect, GalleryState},
    error::WishError,
    persistence::{save_serialized_wishes, serialize_wishes},
    runtime_context::WishbookRuntimeContext,
};

/// Installs the executor that runs queued [`CollectionEffect`] values.
pub fn install(runtime: WishbookRuntimeContext) {
    // Clear the queue before running so effects dispatched mid-drain land in a fresh batch.
    create_effect(move |_| {
        let queued = runtime.effects.get();
        if queued.is_empty() {
            return;
        }

        runtime.effects.set(Vec::new());

        for effect in queued {
            match effect {
                CollectionEffect::Persist => persist_gallery(runtime),
                CollectionEffect::Notify(notice) => runtime.notify(notice),
            }
        }
    });
}

fn persist_gallery(runtime: WishbookRuntimeContext) {
    let last_saved = runtime.last_saved.get_untracked();
    let planned = runtime
        .gallery
        .with_untracked(|gallery| snapshot_to_persist(gallery, last_saved.as_deref()));
    let snapshot = match planned {
        Ok(Some(snapshot)) => snapshot,
        Ok(None) => return,
        Err(err) => {
            logging::warn!("persist wishes failed: {err}");
            return;
        }
    };
    runtime.last_saved.set(Some(snapshot.clone()));

    let slots = runtime.host.with_value(|host| host.slots.clone());
    spawn_local(async move {
        if commit_snapshot(slots.as_ref(), snapshot).await.is_none() {
            runtime.last_saved.set(None);
        }
    });
}

/// Returns the snapshot a Persist should write, or `None` when the write is skipped.
///
/// Nothing is written before hydration, since Hydrate re-emits Persist for records added while
/// the stored list was loading. A snapshot equal to `last_saved` is skipped.
pub(crate) fn snapshot_to_persist(
    gallery: &GalleryState,
    last_saved: Option<&str>,
) -> Result<Option<String>, WishError> {
    if !gallery.hydrated {
        return Ok(None);
    }
    let snapshot = serialize_wishes(&gallery.wishes)?;
    if last_saved == Some(snapshot.as_str()) {
        return Ok(None);
    }
    Ok(Some(snapshot))
}

/// Writes `snapshot` and returns the new `last_saved` baseline.
///
/// A failed write yields `None`, so the next Persist writes again.
pub(crate) async fn commit_snapshot<S: SlotStore + ?Sized>(
    store: &S,
    snapshot: String,
) -> Option<String> {
    match save_serialized_wishes(store, &snapshot).await {
        Ok(()) => Some(snapshot),
        Err(err) => {
            logging::warn!("persist wishes failed: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use futures::executor::block_on;
    use platform_host::MemorySlotStore;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        model::{AttachmentKind, MediaItem, WishId, WishRecord, WISHES_SLOT_KEY},
        persistence::load_wishes,
    };

    fn wish(id: &str, payload: usize) -> WishRecord {
        let media = (payload > 0)
            .then(|| MediaItem {
                kind: AttachmentKind::Photo,
                url: format!("data:image/png;base64,{}", "A".repeat(payload)),
            })
            .into_iter()
            .collect();
        WishRecord::new(
            WishId::from(id),
            "Noor",
            Some(format!("wish {id}")),
            media,
            Utc.timestamp_millis_opt(1_700_000_000_000)
                .single()
                .expect("timestamp"),
        )
    }

    fn hydrated(wishes: Vec<WishRecord>) -> GalleryState {
        GalleryState {
            wishes,
            hydrated: true,
            ..GalleryState::default()
        }
    }

    #[test]
    fn nothing_is_written_before_hydration() {
        let gallery = GalleryState {
            wishes: vec![wish("a", 0)],
            ..GalleryState::default()
        };
        assert_eq!(snapshot_to_persist(&gallery, None).expect("plan"), None);
    }

    #[test]
    fn unchanged_snapshot_is_skipped() {
        let gallery = hydrated(vec![wish("a", 0)]);
        let snapshot = snapshot_to_persist(&gallery, None)
            .expect("plan")
            .expect("first write");
        assert_eq!(
            snapshot_to_persist(&gallery, Some(&snapshot)).expect("plan"),
            None
        );

        let changed = hydrated(vec![wish("b", 0), wish("a", 0)]);
        assert!(snapshot_to_persist(&changed, Some(&snapshot))
            .expect("plan")
            .is_some());
    }

    #[test]
    fn empty_hydrated_gallery_still_writes_an_empty_list() {
        let snapshot = snapshot_to_persist(&hydrated(Vec::new()), None).expect("plan");
        assert_eq!(snapshot.as_deref(), Some("[]"));
    }

    #[test]
    fn failed_write_drops_the_baseline_so_the_next_persist_retries() {
        let store = MemorySlotStore::with_quota(600);
        let small = hydrated(vec![wish("a", 0)]);
        let snapshot = snapshot_to_persist(&small, None)
            .expect("plan")
            .expect("write");
        let baseline = block_on(commit_snapshot(&store, snapshot.clone()));
        assert_eq!(baseline.as_deref(), Some(snapshot.as_str()));

        let big = hydrated(vec![wish("b", 1_000), wish("a", 0)]);
        let oversized = snapshot_to_persist(&big, baseline.as_deref())
            .expect("plan")
            .expect("write");
        let baseline = block_on(commit_snapshot(&store, oversized));
        assert_eq!(baseline, None);
        assert_eq!(store.peek(WISHES_SLOT_KEY), Some(snapshot));
        assert_eq!(block_on(load_wishes(&store)), small.wishes);

        assert!(snapshot_to_persist(&big, baseline.as_deref())
            .expect("plan")
            .is_some());
    }
}
