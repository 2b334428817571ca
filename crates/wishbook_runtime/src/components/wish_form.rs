use leptos::*;
use system_ui::{
    Button, ButtonSize, ButtonVariant, Card, Elevation, Icon, IconButton, IconName, TextArea,
    TextField,
};

use crate::{
    collection::WishAction,
    error::{ValidationError, WishError},
    model::{AttachmentKind, MAX_MESSAGE_CHARS, MAX_NAME_CHARS},
    runtime_context::{use_wishbook_runtime, WishbookRuntimeContext},
    submission::{pick_attachment, submit_draft, WishDraft, ENCODING_STATUS},
};

fn release_previews(runtime: WishbookRuntimeContext, urls: Vec<String>) {
    runtime.host.with_value(|host| {
        for url in &urls {
            host.previews.release_preview(url);
        }
    });
}

fn report(runtime: WishbookRuntimeContext, err: WishError) {
    logging::warn!("wish form: {err}");
    if let Some(notice) = err.notice() {
        runtime.notify(notice);
    }
}

fn attachment_summary(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} media file{plural} attached")
}

#[component]
/// Composer for a new wish: name, message, photo/video picks, and one voice note.
pub fn WishForm() -> impl IntoView {
    let runtime = use_wishbook_runtime();
    let draft = create_rw_signal(WishDraft::default());
    let submitting = create_rw_signal(false);
    let recording = create_rw_signal(false);
    let starting = create_rw_signal(false);
    let capabilities = runtime.host.with_value(|host| host.capabilities);

    on_cleanup(move || {
        let urls = draft.try_update_untracked(WishDraft::clear_attachments);
        if let Some(urls) = urls {
            release_previews(runtime, urls);
        }
    });

    let pick = move |kind: AttachmentKind| {
        let (picker, previews) =
            runtime.host.with_value(|host| (host.picker.clone(), host.previews.clone()));
        spawn_local(async move {
            let blob = match pick_attachment(picker.as_ref(), kind).await {
                Ok(Some(blob)) => blob,
                Ok(None) => return,
                Err(err) => return report(runtime, err.into()),
            };
            let preview = previews.create_preview(&blob);
            let mut attached = Ok(0);
            draft.update(|draft| attached = draft.attach_file(kind, blob, preview.clone()));
            if let Err(err) = attached {
                if let Some(url) = preview {
                    previews.release_preview(&url);
                }
                report(runtime, err.into());
            }
        });
    };

    let toggle_voice = move |_: ev::MouseEvent| {
        let session = runtime.voice.get_value();
        let previews = runtime.host.with_value(|host| host.previews.clone());
        spawn_local(async move {
            if session.is_recording() {
                let stopped = session.stop().await;
                recording.set(false);
                let clip = match stopped {
                    Ok(clip) => clip,
                    Err(err) => return report(runtime, err),
                };
                let preview = previews.create_preview(&clip);
                let mut attached = Ok(0);
                draft.update(|draft| attached = draft.attach_voice(clip, preview.clone()));
                if let Err(err) = attached {
                    if let Some(url) = preview {
                        previews.release_preview(&url);
                    }
                    report(runtime, err.into());
                }
            } else {
                if draft.with_untracked(WishDraft::has_voice) {
                    return report(runtime, ValidationError::VoiceAlreadyAttached.into());
                }
                if session.is_starting() {
                    return;
                }
                starting.set(true);
                let started = session.start().await;
                starting.set(false);
                match started {
                    Ok(()) => recording.set(true),
                    Err(err) => report(runtime, err),
                }
            }
        });
    };

    let remove_attachment = move |key: u64| {
        let mut released = None;
        draft.update(|draft| released = draft.remove_attachment(key));
        release_previews(runtime, released.into_iter().collect());
    };

    let clear_attachments = move |_: ev::MouseEvent| {
        let mut released = Vec::new();
        draft.update(|draft| released = draft.clear_attachments());
        release_previews(runtime, released);
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let snapshot = draft.get_untracked();
        if let Err(err) = snapshot.validate() {
            runtime.notify(err.notice());
            return;
        }

        submitting.set(true);
        let encoder = runtime.host.with_value(|host| host.encoder.clone());
        spawn_local(async move {
            match submit_draft(&snapshot, encoder.as_ref()).await {
                Ok(record) => {
                    runtime.dispatch_action(WishAction::Add { record });
                    let mut released = Vec::new();
                    draft.update(|draft| released = draft.finish_submission(&snapshot));
                    release_previews(runtime, released);
                }
                Err(err) => report(runtime, err),
            }
            submitting.set(false);
        });
    };

    let has_voice = Signal::derive(move || draft.with(WishDraft::has_voice));
    let attachment_count = Signal::derive(move || draft.with(|draft| draft.attachments().len()));

    let previews = move || {
        draft.with(|draft| {
            draft
                .attachments()
                .iter()
                .map(|attachment| {
                    (
                        attachment.key,
                        attachment.kind,
                        attachment.preview_url.clone(),
                        attachment.blob.name.clone(),
                    )
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <Card elevation=Elevation::Raised layout_class="wishbook-form-card">
            <form class="wishbook-form" on:submit=on_submit>
                <h3 class="wishbook-form-title">"Send Your Birthday Wish 🎂"</h3>
                <TextField
                    placeholder="Your name"
                    aria_label="Your name"
                    max_length=MAX_NAME_CHARS
                    value=Signal::derive(move || draft.with(|draft| draft.sender_name().to_string()))
                    on_input=Callback::new(move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|draft| draft.set_sender_name(&value));
                    })
                />
                <TextArea
                    placeholder="Write your birthday message..."
                    aria_label="Birthday message"
                    max_length=MAX_MESSAGE_CHARS
                    value=Signal::derive(move || draft.with(|draft| draft.message().to_string()))
                    on_input=Callback::new(move |ev| {
                        let value = event_target_value(&ev);
                        draft.update(|draft| draft.set_message(&value));
                    })
                />

                <div class="wishbook-form-media-buttons">
                    <Button
                        leading_icon=IconName::Image
                        disabled=!capabilities.file_picker.is_offered()
                        on_click=Callback::new(move |_| pick(AttachmentKind::Photo))
                    >
                        "Photo"
                    </Button>
                    <Button
                        leading_icon=IconName::Video
                        disabled=!capabilities.file_picker.is_offered()
                        on_click=Callback::new(move |_| pick(AttachmentKind::Video))
                    >
                        "Video"
                    </Button>
                    <Button
                        leading_icon=IconName::Mic
                        pressed=recording
                        disabled=Signal::derive(move || {
                            !capabilities.audio_capture.is_offered()
                                || starting.get()
                                || (has_voice.get() && !recording.get())
                        })
                        on_click=Callback::new(toggle_voice)
                    >
                        {move || if recording.get() { "Stop Recording" } else { "Voice Note" }}
                    </Button>
                </div>

                <Show when=move || { attachment_count.get() > 0 }>
                    <div class="wishbook-form-attachment-bar">
                        <span>{move || attachment_summary(attachment_count.get())}</span>
                        <Button
                            variant=ButtonVariant::Quiet
                            size=ButtonSize::Sm
                            on_click=Callback::new(clear_attachments)
                        >
                            "Clear all"
                        </Button>
                    </div>
                </Show>

                <div class="wishbook-form-previews">
                    <For
                        each=previews
                        key=|(key, _, _, _)| *key
                        children=move |(key, kind, preview, name)| {
                            view! {
                                <div class="wishbook-form-preview" data-kind=kind.token()>
                                    <IconButton
                                        icon=IconName::Close
                                        aria_label=format!("Remove {name}")
                                        variant=ButtonVariant::Danger
                                        layout_class="wishbook-form-preview-remove"
                                        on_click=Callback::new(move |_| remove_attachment(key))
                                    />
                                    {attachment_preview(kind, preview, name)}
                                </div>
                            }
                        }
                    />
                </div>

                <Button
                    submit=true
                    variant=ButtonVariant::Primary
                    size=ButtonSize::Lg
                    layout_class="wishbook-submit"
                    disabled=submitting
                >
                    {move || {
                        if submitting.get() {
                            view! {
                                <Icon icon=IconName::Spinner spin=true />
                                {ENCODING_STATUS}
                            }
                                .into_view()
                        } else {
                            view! {
                                <Icon icon=IconName::Send />
                                "Send Birthday Wish"
                            }
                                .into_view()
                        }
                    }}
                </Button>
            </form>
        </Card>
    }
}

fn attachment_preview(kind: AttachmentKind, preview: Option<String>, name: String) -> View {
    let Some(url) = preview else {
        return view! { <p class="wishbook-form-preview-name">{name}</p> }.into_view();
    };
    match kind {
        AttachmentKind::Photo => view! { <img src=url alt="Preview" /> }.into_view(),
        AttachmentKind::Video => view! { <video src=url controls=true></video> }.into_view(),
        AttachmentKind::Voice => view! {
            <div class="wishbook-form-voice-preview">
                <Icon icon=IconName::Mic />
                <audio src=url controls=true></audio>
            </div>
        }
        .into_view(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_summary_pluralizes() {
        assert_eq!(attachment_summary(1), "1 media file attached");
        assert_eq!(attachment_summary(3), "3 media files attached");
    }
}
