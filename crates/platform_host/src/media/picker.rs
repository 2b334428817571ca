use std::{cell::RefCell, collections::VecDeque, future::Future, pin::Pin, rc::Rc};

use super::MediaBlob;

/// Object-safe boxed future used by [`FilePickerService`].
pub type FilePickerFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service that lets the visitor choose one local file.
pub trait FilePickerService {
    /// Opens a picker filtered by the `accept` expression (for example `image/*`).
    ///
    /// Resolves to `Ok(None)` when the visitor dismisses the picker without a selection.
    fn pick_file<'a>(
        &'a self,
        accept: &'a str,
    ) -> FilePickerFuture<'a, Result<Option<MediaBlob>, String>>;
}

#[derive(Debug, Clone, Default)]
/// Picker that hands out pre-queued blobs in order, then reports dismissal.
pub struct QueuedFilePicker {
    queue: Rc<RefCell<VecDeque<MediaBlob>>>,
}

impl QueuedFilePicker {
    /// Queues a blob for a later pick.
    pub fn push(&self, blob: MediaBlob) {
        self.queue.borrow_mut().push_back(blob);
    }
}

impl FilePickerService for QueuedFilePicker {
    fn pick_file<'a>(
        &'a self,
        _accept: &'a str,
    ) -> FilePickerFuture<'a, Result<Option<MediaBlob>, String>> {
        Box::pin(async move { Ok(self.queue.borrow_mut().pop_front()) })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn queued_picker_drains_then_dismisses() {
        let picker = QueuedFilePicker::default();
        picker.push(MediaBlob::zeroed("a.png", "image/png", 4));
        let first = block_on(picker.pick_file("image/*")).expect("pick");
        assert_eq!(first.map(|blob| blob.name).as_deref(), Some("a.png"));
        assert!(block_on(picker.pick_file("image/*")).expect("pick").is_none());
    }
}
