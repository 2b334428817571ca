use leptos::*;
use system_ui::{
    Button, ButtonSize, ButtonVariant, Card, EmptyState, FieldVariant, Icon, IconButton, IconName,
    IconSize, LayoutPadding, TextArea, TextField,
};

use crate::{
    collection::{preview_message, WishAction},
    model::{
        clamp_chars, AttachmentKind, MediaItem, MediaKind, WishRecord, MAX_MESSAGE_CHARS,
        MAX_NAME_CHARS,
    },
    runtime_context::use_wishbook_runtime,
};

fn media_icons(kind: MediaKind) -> &'static [IconName] {
    match kind {
        MediaKind::Text => &[IconName::Message],
        MediaKind::Photo => &[IconName::Image],
        MediaKind::Video => &[IconName::Video],
        MediaKind::Voice => &[IconName::Mic],
        MediaKind::Multiple => &[IconName::Image, IconName::Video, IconName::Mic],
    }
}

#[component]
/// Masonry of stored wishes, newest first, with inline edit and delete.
pub fn WishGallery() -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let gallery = runtime.gallery;

    move || {
        if gallery.with(|state| state.wishes.is_empty()) {
            view! {
                <EmptyState
                    icon=IconName::Cake
                    title="No wishes yet!"
                    description="Be the first to send a birthday wish! 🎉"
                    layout_class="wishbook-gallery-empty"
                />
            }
            .into_view()
        } else {
            view! {
                <div class="wishbook-gallery">
                    <For
                        each=move || gallery.with(|state| state.wishes.clone())
                        key=|wish| (wish.id.clone(), wish.sender_name.clone(), wish.message.clone())
                        children=move |wish| view! { <WishCard wish /> }
                    />
                </div>
            }
            .into_view()
        }
    }
}

#[component]
fn WishCard(wish: WishRecord) -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let gallery = runtime.gallery;
    let id = wish.id.clone();
    let editing = move || gallery.with(|state| state.is_editing(&id));

    let card_wish = wish.clone();
    view! {
        <Card padding=LayoutPadding::Sm layout_class="wishbook-wish-card">
            {move || {
                if editing() {
                    view! { <WishEditor wish=card_wish.clone() /> }.into_view()
                } else {
                    view! { <WishBody wish=card_wish.clone() /> }.into_view()
                }
            }}
        </Card>
    }
}

#[component]
fn WishBody(wish: WishRecord) -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let gallery = runtime.gallery;
    let edit_id = wish.id.clone();
    let delete_id = wish.id.clone();

    let message = wish.message.clone().map(|message| {
        let id = wish.id.clone();
        let expanded = move || gallery.with(|state| state.is_expanded(&id));
        let collapsible = preview_message(&message, false).collapsible;
        let shown_text = {
            let expanded = expanded.clone();
            move || preview_message(&message, expanded()).text
        };
        let toggle_label = move || if expanded() { "Read less" } else { "Read more" };
        let toggle_id = wish.id.clone();
        let toggle = Callback::new(move |_| {
            runtime.dispatch_action(WishAction::ToggleExpanded {
                id: toggle_id.clone(),
            })
        });
        view! {
            <div class="wishbook-wish-message">
                <p>{shown_text}</p>
                {collapsible
                    .then(|| {
                        view! {
                            <Button
                                variant=ButtonVariant::Quiet
                                size=ButtonSize::Sm
                                layout_class="wishbook-read-more"
                                on_click=toggle
                            >
                                {toggle_label}
                            </Button>
                        }
                    })}
            </div>
        }
    });

    let sender = wish.sender_name.clone();
    let media = wish
        .media_items
        .iter()
        .cloned()
        .map(|item| media_view(item, &sender))
        .collect_view();

    view! {
        <div class="wishbook-wish-actions">
            <IconButton
                icon=IconName::Pencil
                aria_label="Edit wish"
                on_click=Callback::new(move |_| {
                    runtime.dispatch_action(WishAction::StartEdit { id: edit_id.clone() })
                })
            />
            <IconButton
                icon=IconName::Trash
                aria_label="Delete wish"
                variant=ButtonVariant::Danger
                on_click=Callback::new(move |_| {
                    runtime.dispatch_action(WishAction::Delete { id: delete_id.clone() })
                })
            />
        </div>
        <header class="wishbook-wish-header">
            <span class="wishbook-avatar">{wish.initial()}</span>
            <div class="wishbook-wish-meta">
                <p class="wishbook-wish-sender">{wish.sender_name.clone()}</p>
                <p class="wishbook-wish-date" data-kind=wish.media_kind.token()>
                    {media_icons(wish.media_kind)
                        .iter()
                        .copied()
                        .map(|icon| view! { <Icon icon size=IconSize::Xs /> })
                        .collect_view()}
                    <span>{wish.short_date()}</span>
                </p>
            </div>
        </header>
        {message}
        <div class="wishbook-wish-media">{media}</div>
    }
}

fn media_view(item: MediaItem, sender: &str) -> View {
    match item.kind {
        AttachmentKind::Photo => view! {
            <img src=item.url alt=format!("Photo from {sender}") loading="lazy" />
        }
        .into_view(),
        AttachmentKind::Video => view! {
            <video src=item.url controls=true preload="metadata" playsinline=true></video>
        }
        .into_view(),
        AttachmentKind::Voice => view! {
            <div class="wishbook-voice-note">
                <span class="wishbook-voice-note-label">
                    <Icon icon=IconName::Mic size=IconSize::Md />
                    "Voice Note"
                </span>
                <audio src=item.url controls=true preload="metadata"></audio>
            </div>
        }
        .into_view(),
    }
}

#[component]
fn WishEditor(wish: WishRecord) -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let name = create_rw_signal(wish.sender_name.clone());
    let message = create_rw_signal(wish.message.clone().unwrap_or_default());
    let id = wish.id;

    view! {
        <div class="wishbook-wish-editor">
            <TextField
                variant=FieldVariant::Compact
                placeholder="Your name"
                aria_label="Your name"
                max_length=MAX_NAME_CHARS
                value=name
                on_input=Callback::new(move |ev| {
                    name.set(clamp_chars(&event_target_value(&ev), MAX_NAME_CHARS))
                })
            />
            <TextArea
                variant=FieldVariant::Compact
                placeholder="Your message"
                aria_label="Your message"
                max_length=MAX_MESSAGE_CHARS
                value=message
                on_input=Callback::new(move |ev| {
                    message.set(clamp_chars(&event_target_value(&ev), MAX_MESSAGE_CHARS))
                })
            />
            <div class="wishbook-wish-editor-actions">
                <Button
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Sm
                    leading_icon=IconName::Check
                    on_click=Callback::new(move |_| {
                        runtime.dispatch_action(WishAction::SaveEdit {
                            id: id.clone(),
                            sender_name: name.get_untracked(),
                            message: message.get_untracked(),
                        })
                    })
                >
                    "Save"
                </Button>
                <Button
                    size=ButtonSize::Sm
                    leading_icon=IconName::Close
                    on_click=Callback::new(move |_| runtime.dispatch_action(WishAction::CancelEdit))
                >
                    "Cancel"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn multiple_kind_shows_every_media_icon() {
        assert_eq!(media_icons(MediaKind::Text), &[IconName::Message]);
        assert_eq!(media_icons(MediaKind::Multiple).len(), 3);
    }
}
