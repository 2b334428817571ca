//! Hidden `<input type="file">` picker.

use platform_host::{FilePickerFuture, FilePickerService, MediaBlob};

use std::{cell::RefCell, rc::Rc};

use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser picker that clicks a transient hidden file input.
pub struct WebFilePicker;

impl FilePickerService for WebFilePicker {
    fn pick_file<'a>(
        &'a self,
        accept: &'a str,
    ) -> FilePickerFuture<'a, Result<Option<MediaBlob>, String>> {
        Box::pin(async move { pick_file(accept).await })
    }
}

/// Outcome slot shared by the input's `change` and `cancel` listeners. The first event wins.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
struct PickOutcome<T> {
    sender: RefCell<Option<oneshot::Sender<Option<T>>>>,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
impl<T> PickOutcome<T> {
    fn channel() -> (Rc<Self>, oneshot::Receiver<Option<T>>) {
        let (tx, rx) = oneshot::channel();
        let outcome = Self {
            sender: RefCell::new(Some(tx)),
        };
        (Rc::new(outcome), rx)
    }

    /// Settles the pick. Returns `false` when it was already settled.
    fn resolve(&self, picked: Option<T>) -> bool {
        match self.sender.borrow_mut().take() {
            Some(tx) => {
                let _ = tx.send(picked);
                true
            }
            None => false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn pick_file(_accept: &str) -> Result<Option<MediaBlob>, String> {
    Err("file picking is only available when compiled for wasm32".to_string())
}

#[cfg(target_arch = "wasm32")]
async fn pick_file(accept: &str) -> Result<Option<MediaBlob>, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document unavailable".to_string())?;
    let input = document
        .create_element("input")
        .map_err(|err| format!("failed to create file input: {err:?}"))?
        .dyn_into::<web_sys::HtmlInputElement>()
        .map_err(|_| "failed to cast file input".to_string())?;
    input.set_type("file");
    input.set_accept(accept);
    input.set_hidden(true);

    if let Some(body) = document.body() {
        let _ = body.append_child(&input);
    }

    let (outcome, rx) = PickOutcome::<web_sys::File>::channel();
    let input_for_change = input.clone();
    let change_outcome = outcome.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let picked = input_for_change.files().and_then(|files| files.get(0));
        change_outcome.resolve(picked);
    }));
    let cancel_outcome = outcome.clone();
    let on_cancel = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        cancel_outcome.resolve(None);
    }));
    input.set_onchange(Some(on_change.as_ref().unchecked_ref()));
    let _ = input.add_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());
    input.click();

    let picked = rx.await.unwrap_or(None);
    input.set_onchange(None);
    let _ = input
        .remove_event_listener_with_callback("cancel", on_cancel.as_ref().unchecked_ref());
    input.remove();
    drop(on_change);
    drop(on_cancel);

    Ok(picked.map(|file| {
        let name = file.name();
        let mime_type = file.type_();
        let size = file.size().max(0.0) as u64;
        MediaBlob::from_platform(name, mime_type, size, file.into())
    }))
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn dismissed_dialog_resolves_to_no_file() {
        let (outcome, rx) = PickOutcome::<String>::channel();
        assert!(outcome.resolve(None));
        assert!(!outcome.resolve(Some("late.png".to_string())));
        assert_eq!(block_on(rx).expect("settled"), None);
    }

    #[test]
    fn first_pick_wins_over_a_later_cancel() {
        let (outcome, rx) = PickOutcome::<String>::channel();
        assert!(outcome.resolve(Some("cake.png".to_string())));
        assert!(!outcome.resolve(None));
        assert_eq!(block_on(rx).expect("settled"), Some("cake.png".to_string()));
    }

    #[test]
    fn native_picker_reports_unavailable() {
        assert!(block_on(WebFilePicker.pick_file("image/*")).is_err());
    }
}
