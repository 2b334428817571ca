//! String-keyed persistent slot contracts and in-memory adapters.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

/// Object-safe boxed future used by [`SlotStore`] async methods.
pub type SlotStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for durable text slots (one JSON document stored per key).
///
/// Every write replaces the whole slot; there is no append or partial update.
pub trait SlotStore {
    /// Reads the raw text stored under `key`, or `None` when the slot is absent.
    fn read_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<Option<String>, String>>;

    /// Overwrites the slot stored under `key`.
    fn write_slot<'a>(&'a self, key: &'a str, raw: &'a str)
        -> SlotStoreFuture<'a, Result<(), String>>;

    /// Removes the slot stored under `key`. Removing an absent slot succeeds.
    fn remove_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<(), String>>;
}

#[derive(Debug, Clone, Default)]
/// In-memory slot store keyed by string, with an optional byte quota.
///
/// The quota counts the UTF-8 length of every stored key and value, mirroring how browsers
/// account `localStorage` usage. Writes that would exceed it fail without modifying the slot.
pub struct MemorySlotStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
    quota_bytes: Option<usize>,
}

impl MemorySlotStore {
    /// Creates a store that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            inner: Rc::default(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Returns the raw slot contents without going through the async contract.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    /// Seeds a slot directly, bypassing the quota.
    pub fn seed(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.inner.borrow_mut().insert(key.into(), raw.into());
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.inner
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl SlotStore for MemorySlotStore {
    fn read_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<Option<String>, String>> {
        Box::pin(async move { Ok(self.peek(key)) })
    }

    fn write_slot<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> SlotStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Some(quota) = self.quota_bytes {
                let needed = self.used_bytes_without(key) + key.len() + raw.len();
                if needed > quota {
                    return Err(format!(
                        "storage quota exceeded ({needed} > {quota} bytes) writing `{key}`"
                    ));
                }
            }
            self.inner
                .borrow_mut()
                .insert(key.to_string(), raw.to_string());
            Ok(())
        })
    }

    fn remove_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.inner.borrow_mut().remove(key);
            Ok(())
        })
    }
}

/// Reads and deserializes a typed slot value through a [`SlotStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store read or JSON deserialization fails.
pub async fn read_slot_with<S: SlotStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, String> {
    let Some(raw) = store.read_slot(key).await? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw).map_err(|e| e.to_string())?;
    Ok(Some(value))
}

/// Serializes and writes a typed slot value through a [`SlotStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or the store write fails.
pub async fn write_slot_with<S: SlotStore + ?Sized, T: Serialize + ?Sized>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), String> {
    let raw = serde_json::to_string(value).map_err(|e| e.to_string())?;
    store.write_slot(key, &raw).await
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Greeting {
        from: String,
    }

    #[test]
    fn memory_slot_store_overwrites_and_removes() {
        let store = MemorySlotStore::default();
        let store_obj: &dyn SlotStore = &store;

        block_on(store_obj.write_slot("wishes", "[1]")).expect("write");
        block_on(store_obj.write_slot("wishes", "[2]")).expect("overwrite");
        assert_eq!(
            block_on(store_obj.read_slot("wishes")).expect("read"),
            Some("[2]".to_string())
        );
        block_on(store_obj.remove_slot("wishes")).expect("remove");
        assert_eq!(block_on(store_obj.read_slot("wishes")).expect("read"), None);
        block_on(store_obj.remove_slot("wishes")).expect("remove absent slot");
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_previous_value() {
        let store = MemorySlotStore::with_quota(16);
        block_on(store.write_slot("k", "small")).expect("fits");

        let err = block_on(store.write_slot("k", "this value is far too long"))
            .expect_err("quota exceeded");
        assert!(err.contains("quota exceeded"), "{err}");
        assert_eq!(store.peek("k").as_deref(), Some("small"));
    }

    #[test]
    fn quota_ignores_the_slot_being_replaced() {
        let store = MemorySlotStore::with_quota(12);
        block_on(store.write_slot("k", "0123456789")).expect("fits");
        block_on(store.write_slot("k", "9876543210")).expect("replacement fits");
    }

    #[test]
    fn typed_slot_helpers_round_trip() {
        let store = MemorySlotStore::default();
        block_on(write_slot_with(
            &store,
            "greeting",
            &Greeting {
                from: "Ada".to_string(),
            },
        ))
        .expect("write typed");

        let loaded: Option<Greeting> =
            block_on(read_slot_with(&store, "greeting")).expect("read typed");
        assert_eq!(
            loaded,
            Some(Greeting {
                from: "Ada".to_string()
            })
        );
    }

    #[test]
    fn typed_read_reports_corrupt_json() {
        let store = MemorySlotStore::default();
        store.seed("greeting", "{not json");
        let result: Result<Option<Greeting>, String> = block_on(read_slot_with(&store, "greeting"));
        assert!(result.is_err());
    }
}
