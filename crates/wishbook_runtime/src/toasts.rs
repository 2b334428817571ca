//! In-page toast queue and the notification service that feeds it.

use std::time::Duration;

use leptos::*;
use platform_host::{Notice, NotificationFuture, NotificationService};

/// How long a toast stays on screen.
pub const TOAST_DISMISS_AFTER: Duration = Duration::from_millis(4_000);
/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE_TOASTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// Visible toasts, oldest first.
pub struct ToastQueue {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastQueue {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Appends a toast, evicting the oldest past [`MAX_VISIBLE_TOASTS`]. Returns its id.
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast { id, notice });
        if self.toasts.len() > MAX_VISIBLE_TOASTS {
            let overflow = self.toasts.len() - MAX_VISIBLE_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

#[derive(Clone, Copy)]
/// [`NotificationService`] that renders notices as auto-dismissing page toasts.
pub struct ToastNotificationService {
    queue: RwSignal<ToastQueue>,
}

impl ToastNotificationService {
    pub fn new(queue: RwSignal<ToastQueue>) -> Self {
        Self { queue }
    }
}

impl NotificationService for ToastNotificationService {
    fn notify<'a>(&'a self, notice: &'a Notice) -> NotificationFuture<'a, Result<(), String>> {
        let queue = self.queue;
        let notice = notice.clone();
        Box::pin(async move {
            let mut id = None;
            queue.update(|toasts| id = Some(toasts.push(notice)));
            if let Some(id) = id {
                set_timeout(
                    move || queue.update(|toasts| toasts.dismiss(id)),
                    TOAST_DISMISS_AFTER,
                );
            }
            Ok(())
        })
    }
}
