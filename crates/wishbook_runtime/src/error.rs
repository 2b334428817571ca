//! Typed failures of the wish pipeline and their user-facing notices.

use platform_host::Notice;
use thiserror::Error;

use crate::model::{AttachmentKind, WishId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Input rejected before any encoding or mutation happens.
pub enum ValidationError {
    /// Sender name is blank after trimming.
    #[error("name required")]
    NameRequired,
    /// Message is blank and nothing is attached.
    #[error("content required")]
    ContentRequired,
    /// Picked file exceeds its kind's ceiling.
    #[error("{kind} `{name}` is {size} bytes, over the {limit} byte limit")]
    AttachmentTooLarge {
        /// Attachment kind that was requested.
        kind: AttachmentKind,
        /// File name.
        name: String,
        /// Reported size.
        size: u64,
        /// Inclusive ceiling for `kind`.
        limit: u64,
    },
    /// A voice note is already attached to the draft.
    #[error("a voice note is already attached")]
    VoiceAlreadyAttached,
}

impl ValidationError {
    /// Toast shown for this rejection.
    pub fn notice(&self) -> Notice {
        match self {
            Self::NameRequired => Notice::destructive("Name required", "Please enter your name."),
            Self::ContentRequired => Notice::destructive(
                "Content required",
                "Please add a message or upload media.",
            ),
            Self::AttachmentTooLarge { kind, .. } => {
                let (noun, ceiling) = match kind {
                    AttachmentKind::Video => ("Videos", "100MB"),
                    AttachmentKind::Photo | AttachmentKind::Voice => ("Photos", "10MB"),
                };
                Notice::destructive("File too large", format!("{noun} must be under {ceiling}."))
            }
            Self::VoiceAlreadyAttached => Notice::destructive(
                "Voice note already attached",
                "Remove the current voice note before recording another.",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Any failure surfaced by the wish runtime. None of them is fatal.
pub enum WishError {
    /// Rejected input.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An attachment could not be turned into a `data:` reference.
    #[error("failed to encode `{name}`: {reason}")]
    Encoding {
        /// File name of the attachment that failed.
        name: String,
        /// Platform reason.
        reason: String,
    },
    /// Microphone unavailable, denied, or the recorder failed.
    #[error("voice capture failed: {0}")]
    Capture(String),
    /// The durable mirror could not be read or written.
    #[error("storage fault: {0}")]
    Storage(String),
    /// A record with this id is already in the collection.
    #[error("wish `{0}` already exists")]
    DuplicateId(WishId),
}

impl WishError {
    /// Toast shown for this failure, or `None` for failures that are only logged.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Validation(err) => Some(err.notice()),
            Self::Encoding { .. } => Some(Notice::destructive(
                "Failed to prepare wish",
                self.to_string(),
            )),
            Self::Capture(_) => Some(Notice::destructive(
                "Microphone access denied",
                "Please allow microphone access to record voice notes.",
            )),
            Self::Storage(_) | Self::DuplicateId(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use platform_host::NoticeLevel;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn oversized_video_names_the_video_ceiling() {
        let notice = ValidationError::AttachmentTooLarge {
            kind: AttachmentKind::Video,
            name: "clip.mp4".into(),
            size: 1,
            limit: 0,
        }
        .notice();
        assert_eq!(notice.title, "File too large");
        assert_eq!(notice.description.as_deref(), Some("Videos must be under 100MB."));
        assert_eq!(notice.level, NoticeLevel::Destructive);
    }

    #[test]
    fn storage_faults_stay_silent() {
        assert_eq!(WishError::Storage("quota".into()).notice(), None);
        assert_eq!(WishError::DuplicateId(WishId::from("x")).notice(), None);
        assert!(WishError::Encoding {
            name: "a.png".into(),
            reason: "read failed".into()
        }
        .notice()
        .is_some());
    }
}
