//! Wishbook runtime: the wish model, store adapter, submission pipeline, collection reducer, and
//! the Leptos page that composes them.

pub mod collection;
pub mod components;
pub mod config;
mod effect_executor;
pub mod error;
pub mod model;
pub mod persistence;
pub mod presentation;
mod runtime_context;
pub mod submission;
pub mod toasts;
pub mod voice;

pub use collection::{reduce_gallery, CollectionEffect, GalleryState, WishAction};
pub use components::{use_wishbook_runtime, WishbookPage, WishbookProvider, WishbookRuntimeContext};
pub use config::{tribute_config, TributeConfig};
pub use error::{ValidationError, WishError};
pub use model::*;
pub use persistence::{
    clear_wishes, load_or_create_visitor_id, load_wishes, save_wishes, try_save_wishes,
};
pub use submission::{submit_draft, WishDraft};
pub use voice::{VoicePhase, VoiceSession};
