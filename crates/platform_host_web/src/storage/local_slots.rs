//! `localStorage`-backed slot store implementation.
//!
//! The browser API is synchronous; the [`platform_host::SlotStore`] impl wraps it in ready
//! futures so callers stay agnostic of the backing store.

use platform_host::{SlotStore, SlotStoreFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser slot store backed by `window.localStorage`.
pub struct WebSlotStore;

impl WebSlotStore {
    /// Reads the raw text stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable (for example, blocked by privacy
    /// settings) or the read throws.
    pub fn read_raw(self, key: &str) -> Result<Option<String>, String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|e| format!("localStorage get_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    /// Overwrites the slot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the write fails, most commonly with a
    /// `QuotaExceededError` once inlined media fills the origin's allowance.
    pub fn write_raw(self, key: &str, raw: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .set_item(key, raw)
                .map_err(|e| format!("localStorage set_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (key, raw);
            Ok(())
        }
    }

    /// Removes the slot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when localStorage is unavailable or the removal fails.
    pub fn remove_raw(self, key: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            local_storage()?
                .remove_item(key)
                .map_err(|e| format!("localStorage remove_item failed: {e:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = key;
            Ok(())
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or_else(|| "localStorage unavailable".to_string())
}

impl SlotStore for WebSlotStore {
    fn read_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<Option<String>, String>> {
        let store = *self;
        Box::pin(async move { store.read_raw(key) })
    }

    fn write_slot<'a>(
        &'a self,
        key: &'a str,
        raw: &'a str,
    ) -> SlotStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.write_raw(key, raw) })
    }

    fn remove_slot<'a>(&'a self, key: &'a str) -> SlotStoreFuture<'a, Result<(), String>> {
        let store = *self;
        Box::pin(async move { store.remove_raw(key) })
    }
}
