//! Session provider: owns the gallery state, the effect queue, the toast surface, and the host
//! bundle, and hydrates everything from the store once on mount.

use std::rc::Rc;

use leptos::*;
use platform_host::{HostServices, Notice, NotificationService};

use crate::{
    collection::{reduce_gallery, CollectionEffect, GalleryState, WishAction},
    effect_executor,
    persistence::{load_or_create_visitor_id, load_wishes, serialize_wishes},
    toasts::{ToastNotificationService, ToastQueue},
    voice::VoiceSession,
};

#[derive(Clone, Copy)]
/// Leptos context shared by the wish form and gallery.
pub struct WishbookRuntimeContext {
    /// Host adapters injected by the entry layer.
    pub host: StoredValue<HostServices>,
    /// The in-memory collection; the single source of truth for the session.
    pub gallery: RwSignal<GalleryState>,
    /// Reducer-emitted effects awaiting the executor.
    pub effects: RwSignal<Vec<CollectionEffect>>,
    /// Visible toasts.
    pub toasts: RwSignal<ToastQueue>,
    /// Voice capture session for the form.
    pub voice: StoredValue<VoiceSession>,
    /// Reducer dispatch callback.
    pub dispatch: Callback<WishAction>,
    pub(crate) last_saved: RwSignal<Option<String>>,
    notifier: StoredValue<Rc<dyn NotificationService>>,
}

impl WishbookRuntimeContext {
    /// Dispatches a reducer action through the context callback.
    pub fn dispatch_action(&self, action: WishAction) {
        self.dispatch.call(action);
    }

    /// Shows `notice` on the toast surface.
    pub fn notify(&self, notice: Notice) {
        let notifier = self.notifier.get_value();
        spawn_local(async move {
            if let Err(err) = notifier.notify(&notice).await {
                logging::warn!("notification dispatch failed: {err}");
            }
        });
    }
}

fn install_boot_hydration(runtime: WishbookRuntimeContext) {
    create_effect(move |_| {
        let slots = runtime.host.with_value(|host| host.slots.clone());
        spawn_local(async move {
            load_or_create_visitor_id(slots.as_ref()).await;

            let records = load_wishes(slots.as_ref()).await;
            match serialize_wishes(&records) {
                Ok(serialized) => runtime.last_saved.set(Some(serialized)),
                Err(err) => logging::warn!("wish snapshot baseline failed: {err}"),
            }
            runtime.dispatch_action(WishAction::Hydrate { records });
        });
    });
}

#[component]
/// Provides [`WishbookRuntimeContext`] to descendant components and hydrates stored wishes.
pub fn WishbookProvider(
    /// Injected browser host bundle assembled by the entry layer.
    host_services: HostServices,
    children: Children,
) -> impl IntoView {
    let voice = store_value(VoiceSession::new(host_services.audio.clone()));
    let host = store_value(host_services);
    let gallery = create_rw_signal(GalleryState::default());
    let effects = create_rw_signal(Vec::<CollectionEffect>::new());
    let toasts = create_rw_signal(ToastQueue::default());
    let last_saved = create_rw_signal(None::<String>);
    let notifier: Rc<dyn NotificationService> = Rc::new(ToastNotificationService::new(toasts));
    let notifier = store_value(notifier);

    let dispatch = Callback::new(move |action: WishAction| {
        let mut next = gallery.get_untracked();
        let previous = next.clone();

        match reduce_gallery(&mut next, action) {
            Ok(new_effects) => {
                if next != previous {
                    gallery.set(next);
                }
                if !new_effects.is_empty() {
                    effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => {
                logging::warn!("wish reducer error: {err}");
                if let Some(notice) = err.notice() {
                    effects.update(|queue| queue.push(CollectionEffect::Notify(notice)));
                }
            }
        }
    });

    let runtime = WishbookRuntimeContext {
        host,
        gallery,
        effects,
        toasts,
        voice,
        dispatch,
        last_saved,
        notifier,
    };

    provide_context(runtime);

    install_boot_hydration(runtime);
    effect_executor::install(runtime);

    children().into_view()
}

/// Returns the current [`WishbookRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`WishbookProvider`].
pub fn use_wishbook_runtime() -> WishbookRuntimeContext {
    use_context::<WishbookRuntimeContext>().expect("WishbookRuntimeContext not provided")
}
