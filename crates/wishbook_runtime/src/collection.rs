//! Wish collection state, reducer actions, and side-effect intents.

use std::collections::BTreeSet;

use platform_host::Notice;

use crate::{
    error::{ValidationError, WishError},
    model::{WishId, WishRecord},
};

/// Messages longer than this many characters render collapsed until expanded.
pub const MESSAGE_PREVIEW_CHARS: usize = 150;

#[derive(Debug, Clone, PartialEq, Default)]
/// Session-owned gallery state. `wishes` is newest first.
pub struct GalleryState {
    pub wishes: Vec<WishRecord>,
    pub editing: Option<WishId>,
    pub expanded: BTreeSet<WishId>,
    pub hydrated: bool,
}

impl GalleryState {
    pub fn find(&self, id: &WishId) -> Option<&WishRecord> {
        self.wishes.iter().find(|wish| &wish.id == id)
    }

    pub fn is_editing(&self, id: &WishId) -> bool {
        self.editing.as_ref() == Some(id)
    }

    pub fn is_expanded(&self, id: &WishId) -> bool {
        self.expanded.contains(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_gallery`].
pub enum WishAction {
    /// Merge records loaded from the store behind anything added this session.
    ///
    /// Persists only when session records had to be merged in; a plain load writes nothing.
    Hydrate {
        /// Stored records, newest first.
        records: Vec<WishRecord>,
    },
    /// Prepend a freshly submitted record.
    Add {
        /// New record.
        record: WishRecord,
    },
    /// Remove a record by id.
    Delete {
        /// Record to remove.
        id: WishId,
    },
    /// Open the inline editor for a record.
    StartEdit {
        /// Record to edit.
        id: WishId,
    },
    /// Commit edited name and message.
    SaveEdit {
        /// Record being edited.
        id: WishId,
        /// New sender name, trimmed on commit.
        sender_name: String,
        /// New message; blank clears it.
        message: String,
    },
    /// Close the editor without changes.
    CancelEdit,
    /// Flip the expanded state of a long message.
    ToggleExpanded {
        /// Record whose message is toggled.
        id: WishId,
    },
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_gallery`].
pub enum CollectionEffect {
    /// Mirror the full collection to the store.
    Persist,
    /// Show a toast.
    Notify(Notice),
}

/// Applies `action` to `state`, returning the side effects to run.
///
/// # Errors
///
/// Returns [`WishError::DuplicateId`] when adding a record whose id is present, or
/// [`WishError::Validation`] when an edit would blank the sender name. `state` is unchanged on
/// error.
pub fn reduce_gallery(
    state: &mut GalleryState,
    action: WishAction,
) -> Result<Vec<CollectionEffect>, WishError> {
    let mut effects = Vec::new();

    match action {
        WishAction::Hydrate { records } => {
            let had_session_records = !state.wishes.is_empty();
            let mut seen: BTreeSet<WishId> =
                state.wishes.iter().map(|wish| wish.id.clone()).collect();
            for record in records {
                if seen.insert(record.id.clone()) {
                    state.wishes.push(record);
                } else {
                    leptos::logging::warn!("dropping stored wish with duplicate id {}", record.id);
                }
            }
            state.hydrated = true;
            if had_session_records {
                effects.push(CollectionEffect::Persist);
            }
        }
        WishAction::Add { record } => {
            if state.find(&record.id).is_some() {
                return Err(WishError::DuplicateId(record.id));
            }
            state.wishes.insert(0, record);
            effects.push(CollectionEffect::Persist);
            effects.push(CollectionEffect::Notify(
                Notice::info("Wish saved! 🎉")
                    .with_description("Your wish has been saved to local storage."),
            ));
        }
        WishAction::Delete { id } => {
            let before = state.wishes.len();
            state.wishes.retain(|wish| wish.id != id);
            if state.wishes.len() != before {
                state.expanded.remove(&id);
                if state.is_editing(&id) {
                    state.editing = None;
                }
                effects.push(CollectionEffect::Persist);
                effects.push(CollectionEffect::Notify(Notice::info("Wish deleted")));
            }
        }
        WishAction::StartEdit { id } => {
            if state.find(&id).is_some() {
                state.editing = Some(id);
            }
        }
        WishAction::SaveEdit {
            id,
            sender_name,
            message,
        } => {
            if sender_name.trim().is_empty() {
                return Err(ValidationError::NameRequired.into());
            }
            let Some(record) = state.wishes.iter_mut().find(|wish| wish.id == id) else {
                state.editing = None;
                return Ok(effects);
            };
            record.apply_edit(&sender_name, &message);
            state.editing = None;
            effects.push(CollectionEffect::Persist);
            effects.push(CollectionEffect::Notify(Notice::info("Wish updated")));
        }
        WishAction::CancelEdit => {
            state.editing = None;
        }
        WishAction::ToggleExpanded { id } => {
            if !state.expanded.remove(&id) {
                state.expanded.insert(id);
            }
        }
    }

    Ok(effects)
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// How a message renders in the gallery.
pub struct MessagePreview {
    /// Text to show.
    pub text: String,
    /// Whether the message is long enough to offer a read more / read less toggle.
    pub collapsible: bool,
}

/// Collapses messages over [`MESSAGE_PREVIEW_CHARS`] characters unless `expanded`.
pub fn preview_message(message: &str, expanded: bool) -> MessagePreview {
    let collapsible = message.chars().count() > MESSAGE_PREVIEW_CHARS;
    let text = if collapsible && !expanded {
        let head: String = message.chars().take(MESSAGE_PREVIEW_CHARS).collect();
        format!("{}…", head.trim_end())
    } else {
        message.to_string()
    };
    MessagePreview { text, collapsible }
}
