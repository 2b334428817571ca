use leptos::*;
use system_ui::{IconButton, IconName};

use crate::runtime_context::use_wishbook_runtime;

#[component]
/// Stack of auto-dismissing notices.
pub fn ToastViewport() -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let toasts = runtime.toasts;

    view! {
        <ol class="wishbook-toasts" role="status" aria-live="polite">
            <For
                each=move || toasts.with(|queue| queue.toasts().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <li class="wishbook-toast" data-ui-variant=toast.notice.level.token()>
                            <p class="wishbook-toast-title">{toast.notice.title.clone()}</p>
                            {toast
                                .notice
                                .description
                                .clone()
                                .map(|description| {
                                    view! { <p class="wishbook-toast-body">{description}</p> }
                                })}
                            <IconButton
                                icon=IconName::Close
                                aria_label="Dismiss"
                                on_click=Callback::new(move |_| toasts.update(|queue| queue.dismiss(id)))
                            />
                        </li>
                    }
                }
            />
        </ol>
    }
}
