//! Wish draft state, attachment validation, and the encode-then-build submission step.

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use leptos::logging;
use platform_host::{encode_media_with, utc_now_ms, FilePickerService, MediaBlob, MediaEncoder};

use crate::{
    error::{ValidationError, WishError},
    model::{
        clamp_chars, normalize_message, AttachmentKind, MediaItem, WishId, WishRecord,
        MAX_MESSAGE_CHARS, MAX_NAME_CHARS,
    },
};

/// Progress line shown on the submit button while attachments are encoded.
pub const ENCODING_STATUS: &str = "Converting media for storage...";

#[derive(Debug, Clone)]
/// An attachment held by the draft until submission.
pub struct PendingAttachment {
    /// Draft-local key, stable across removals of other attachments.
    pub key: u64,
    /// Attachment kind.
    pub kind: AttachmentKind,
    /// Captured or picked file.
    pub blob: MediaBlob,
    /// Preview URL owned by this attachment; released when it leaves the draft.
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// Form state of a wish being composed.
///
/// Text setters clamp to the input ceilings the way the form's `maxlength` does. Every method
/// that drops attachments hands back their preview URLs so the caller can release them.
pub struct WishDraft {
    sender_name: String,
    message: String,
    attachments: Vec<PendingAttachment>,
    next_key: u64,
}

impl WishDraft {
    pub fn sender_name(&self) -> &str {
        &self.sender_name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn attachments(&self) -> &[PendingAttachment] {
        &self.attachments
    }

    pub fn set_sender_name(&mut self, value: &str) {
        self.sender_name = clamp_chars(value, MAX_NAME_CHARS);
    }

    pub fn set_message(&mut self, value: &str) {
        self.message = clamp_chars(value, MAX_MESSAGE_CHARS);
    }

    /// Whether a voice note is attached.
    pub fn has_voice(&self) -> bool {
        self.attachments
            .iter()
            .any(|attachment| attachment.kind == AttachmentKind::Voice)
    }

    /// Attaches a picked photo or video after checking its size ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::AttachmentTooLarge`] when the file is over the ceiling, and
    /// [`ValidationError::VoiceAlreadyAttached`] if a second voice note is offered this way.
    pub fn attach_file(
        &mut self,
        kind: AttachmentKind,
        blob: MediaBlob,
        preview_url: Option<String>,
    ) -> Result<u64, ValidationError> {
        check_attachment_size(kind, &blob)?;
        if kind == AttachmentKind::Voice && self.has_voice() {
            return Err(ValidationError::VoiceAlreadyAttached);
        }
        Ok(self.push(kind, blob, preview_url))
    }

    /// Attaches a finalized voice recording. At most one voice note is held at a time.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::VoiceAlreadyAttached`] when one is already attached.
    pub fn attach_voice(
        &mut self,
        blob: MediaBlob,
        preview_url: Option<String>,
    ) -> Result<u64, ValidationError> {
        if self.has_voice() {
            return Err(ValidationError::VoiceAlreadyAttached);
        }
        Ok(self.push(AttachmentKind::Voice, blob, preview_url))
    }

    fn push(&mut self, kind: AttachmentKind, blob: MediaBlob, preview_url: Option<String>) -> u64 {
        let key = self.next_key;
        self.next_key += 1;
        self.attachments.push(PendingAttachment {
            key,
            kind,
            blob,
            preview_url,
        });
        key
    }

    /// Removes one attachment, returning its preview URL. Unknown keys are ignored.
    pub fn remove_attachment(&mut self, key: u64) -> Option<String> {
        let index = self
            .attachments
            .iter()
            .position(|attachment| attachment.key == key)?;
        self.attachments.remove(index).preview_url
    }

    /// Drops every attachment, returning their preview URLs.
    pub fn clear_attachments(&mut self) -> Vec<String> {
        self.attachments
            .drain(..)
            .filter_map(|attachment| attachment.preview_url)
            .collect()
    }

    /// Clears what `submitted` carried into the saved wish, returning the preview URLs to release.
    ///
    /// Attachments added after the snapshot was taken stay, and the text fields are only cleared
    /// while they still hold the submitted values.
    pub fn finish_submission(&mut self, submitted: &WishDraft) -> Vec<String> {
        if self.sender_name == submitted.sender_name {
            self.sender_name.clear();
        }
        if self.message == submitted.message {
            self.message.clear();
        }

        let mut released = Vec::new();
        self.attachments.retain_mut(|attachment| {
            let was_submitted = submitted
                .attachments
                .iter()
                .any(|sent| sent.key == attachment.key);
            if was_submitted {
                released.extend(attachment.preview_url.take());
            }
            !was_submitted
        });
        released
    }

    /// Synchronous checks run before any encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameRequired`] for a blank name, otherwise
    /// [`ValidationError::ContentRequired`] for a blank message with nothing attached.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sender_name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.message.trim().is_empty() && self.attachments.is_empty() {
            return Err(ValidationError::ContentRequired);
        }
        Ok(())
    }
}

/// Checks `blob` against the inclusive ceiling for `kind`.
///
/// # Errors
///
/// Returns [`ValidationError::AttachmentTooLarge`] when the blob is larger than allowed.
pub fn check_attachment_size(kind: AttachmentKind, blob: &MediaBlob) -> Result<(), ValidationError> {
    match kind.max_bytes() {
        Some(limit) if blob.size > limit => Err(ValidationError::AttachmentTooLarge {
            kind,
            name: blob.name.clone(),
            size: blob.size,
            limit,
        }),
        _ => Ok(()),
    }
}

/// Opens the picker for `kind` and validates the chosen file.
///
/// Resolves to `Ok(None)` when the picker is dismissed or fails; picker failures are logged.
///
/// # Errors
///
/// Returns [`ValidationError::AttachmentTooLarge`] for an oversized file.
pub async fn pick_attachment<P: FilePickerService + ?Sized>(
    picker: &P,
    kind: AttachmentKind,
) -> Result<Option<MediaBlob>, ValidationError> {
    let blob = match picker.pick_file(kind.accept()).await {
        Ok(Some(blob)) => blob,
        Ok(None) => return Ok(None),
        Err(err) => {
            logging::warn!("{kind} picker failed: {err}");
            return Ok(None);
        }
    };
    check_attachment_size(kind, &blob)?;
    Ok(Some(blob))
}

/// Validates the draft, encodes every attachment concurrently, and builds a new record with a
/// fresh id and the current time.
///
/// # Errors
///
/// Returns [`WishError::Validation`] before any encoding starts, or [`WishError::Encoding`] if
/// any attachment fails to encode. The draft is left untouched either way.
pub async fn submit_draft<E: MediaEncoder + ?Sized>(
    draft: &WishDraft,
    encoder: &E,
) -> Result<WishRecord, WishError> {
    submit_draft_as(draft, encoder, WishId::generate(), utc_now_ms()).await
}

/// [`submit_draft`] with a caller-supplied id and timestamp.
///
/// # Errors
///
/// Same as [`submit_draft`].
pub async fn submit_draft_as<E: MediaEncoder + ?Sized>(
    draft: &WishDraft,
    encoder: &E,
    id: WishId,
    created_at: DateTime<Utc>,
) -> Result<WishRecord, WishError> {
    draft.validate()?;

    let media_items = try_join_all(draft.attachments.iter().map(|attachment| async move {
        encode_media_with(encoder, &attachment.blob)
            .await
            .map(|url| MediaItem {
                kind: attachment.kind,
                url,
            })
            .map_err(|reason| WishError::Encoding {
                name: attachment.blob.name.clone(),
                reason,
            })
    }))
    .await?;

    Ok(WishRecord::new(
        id,
        draft.sender_name.trim(),
        normalize_message(&draft.message),
        media_items,
        created_at,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use futures::executor::block_on;
    use platform_host::{InlineMediaEncoder, QueuedFilePicker};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{MediaKind, PHOTO_MAX_BYTES};

    fn named(name: &str) -> WishDraft {
        let mut draft = WishDraft::default();
        draft.set_sender_name(name);
        draft
    }

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_720_000_000_000)
            .single()
            .expect("timestamp")
    }

    #[test]
    fn blank_name_is_rejected_before_content() {
        let mut draft = named("   ");
        draft.set_message("hello");
        assert_eq!(draft.validate(), Err(ValidationError::NameRequired));
    }

    #[test]
    fn blank_message_without_attachments_is_rejected() {
        let mut draft = named("Eve");
        draft.set_message("  \n ");
        assert_eq!(draft.validate(), Err(ValidationError::ContentRequired));
        let err = block_on(submit_draft(&draft, &InlineMediaEncoder)).expect_err("no content");
        assert_eq!(err, WishError::Validation(ValidationError::ContentRequired));
    }

    #[test]
    fn text_only_wish_is_trimmed_and_has_no_media() {
        let mut draft = named("  Eve ");
        draft.set_message("  Happy birthday!  ");
        let record = block_on(submit_draft_as(
            &draft,
            &InlineMediaEncoder,
            WishId::from("t"),
            now(),
        ))
        .expect("submit");

        assert_eq!(record.sender_name, "Eve");
        assert_eq!(record.message.as_deref(), Some("Happy birthday!"));
        assert_eq!(record.media_kind, MediaKind::Text);
        assert!(record.media_items.is_empty());
        assert_eq!(record.created_at, now());
    }

    #[test]
    fn photo_and_video_produce_multiple_in_attachment_order() {
        let mut draft = named("Fay");
        draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_bytes("a.png", "image/png", b"png".to_vec()),
                None,
            )
            .expect("photo");
        draft
            .attach_file(
                AttachmentKind::Video,
                MediaBlob::from_bytes("b.mp4", "video/mp4", b"mp4".to_vec()),
                None,
            )
            .expect("video");

        let record = block_on(submit_draft(&draft, &InlineMediaEncoder)).expect("submit");
        assert_eq!(record.media_kind, MediaKind::Multiple);
        assert_eq!(record.message, None);
        let kinds: Vec<_> = record.media_items.iter().map(|item| item.kind).collect();
        assert_eq!(kinds, vec![AttachmentKind::Photo, AttachmentKind::Video]);
        assert_eq!(record.media_items[0].url, "data:image/png;base64,cG5n");
        assert!(record.media_items[1].url.starts_with("data:video/mp4;base64,"));
    }

    #[test]
    fn photo_ceiling_is_inclusive() {
        let mut draft = named("Gus");
        let at_limit = MediaBlob::zeroed("max.jpg", "image/jpeg", PHOTO_MAX_BYTES as usize);
        assert!(draft
            .attach_file(AttachmentKind::Photo, at_limit, None)
            .is_ok());

        let over = MediaBlob::zeroed("big.jpg", "image/jpeg", PHOTO_MAX_BYTES as usize + 1);
        let err = draft
            .attach_file(AttachmentKind::Photo, over, None)
            .expect_err("over limit");
        assert!(matches!(
            err,
            ValidationError::AttachmentTooLarge { size, limit, .. }
                if size == PHOTO_MAX_BYTES + 1 && limit == PHOTO_MAX_BYTES
        ));
        assert_eq!(draft.attachments().len(), 1);
    }

    #[test]
    fn only_one_voice_note_may_be_attached() {
        let mut draft = named("Hal");
        let clip = || MediaBlob::from_bytes("voice-note.webm", "audio/webm", vec![1, 2, 3]);
        draft.attach_voice(clip(), None).expect("first voice");
        assert_eq!(
            draft.attach_voice(clip(), None),
            Err(ValidationError::VoiceAlreadyAttached)
        );
        assert!(draft.has_voice());
    }

    #[test]
    fn removal_and_finished_submission_hand_back_preview_urls() {
        let mut draft = named("Ida");
        draft.set_message("msg");
        let first = draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_bytes("1.png", "image/png", vec![1]),
                Some("blob:one".into()),
            )
            .expect("first");
        draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_bytes("2.png", "image/png", vec![2]),
                Some("blob:two".into()),
            )
            .expect("second");

        assert_eq!(draft.remove_attachment(first), Some("blob:one".to_string()));
        assert_eq!(draft.remove_attachment(first), None);
        let submitted = draft.clone();
        assert_eq!(draft.finish_submission(&submitted), vec!["blob:two".to_string()]);
        assert_eq!(draft.sender_name(), "");
        assert_eq!(draft.message(), "");
        assert!(draft.attachments().is_empty());
    }

    #[test]
    fn edits_made_while_encoding_survive_the_submission() {
        let mut draft = named("Kai");
        draft.set_message("first");
        draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_bytes("sent.png", "image/png", vec![1]),
                Some("blob:sent".into()),
            )
            .expect("sent");
        let submitted = draft.clone();

        draft.set_message("a second thought");
        let late = draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_bytes("late.png", "image/png", vec![2]),
                Some("blob:late".into()),
            )
            .expect("late");

        assert_eq!(draft.finish_submission(&submitted), vec!["blob:sent".to_string()]);
        assert_eq!(draft.sender_name(), "");
        assert_eq!(draft.message(), "a second thought");
        let keys: Vec<u64> = draft.attachments().iter().map(|a| a.key).collect();
        assert_eq!(keys, vec![late]);
        assert_eq!(draft.attachments()[0].preview_url.as_deref(), Some("blob:late"));
    }

    #[test]
    fn encoding_failure_aborts_and_keeps_attachments() {
        let mut draft = named("Jo");
        draft
            .attach_file(
                AttachmentKind::Video,
                MediaBlob::from_reference("remote.mp4", "video/mp4", "https://example.com/v.mp4"),
                None,
            )
            .expect("attach");

        let err = block_on(submit_draft(&draft, &InlineMediaEncoder)).expect_err("unreadable");
        assert!(matches!(err, WishError::Encoding { ref name, .. } if name == "remote.mp4"));
        assert_eq!(draft.attachments().len(), 1);
    }

    #[test]
    fn self_contained_references_pass_through_unchanged() {
        let mut draft = named("Kai");
        let url = "data:image/gif;base64,R0lGODlh";
        draft
            .attach_file(
                AttachmentKind::Photo,
                MediaBlob::from_reference("a.gif", "image/gif", url),
                None,
            )
            .expect("attach");
        let record = block_on(submit_draft(&draft, &InlineMediaEncoder)).expect("submit");
        assert_eq!(record.media_items[0].url, url);
        assert_eq!(record.media_kind, MediaKind::Photo);
    }

    #[test]
    fn setters_clamp_to_input_ceilings() {
        let mut draft = WishDraft::default();
        draft.set_sender_name(&"n".repeat(80));
        draft.set_message(&"m".repeat(700));
        assert_eq!(draft.sender_name().chars().count(), MAX_NAME_CHARS);
        assert_eq!(draft.message().chars().count(), MAX_MESSAGE_CHARS);
    }

    #[test]
    fn picker_dismissal_and_oversize_are_distinguished() {
        let picker = QueuedFilePicker::default();
        assert!(block_on(pick_attachment(&picker, AttachmentKind::Photo))
            .expect("dismissed")
            .is_none());

        picker.push(MediaBlob::zeroed("big.png", "image/png", PHOTO_MAX_BYTES as usize + 1));
        assert!(matches!(
            block_on(pick_attachment(&picker, AttachmentKind::Photo)),
            Err(ValidationError::AttachmentTooLarge { .. })
        ));
    }
}
