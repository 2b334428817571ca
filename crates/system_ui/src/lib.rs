//! Shared UI primitive library for the wishbook page.
//!
//! The crate owns a small set of Leptos primitives, a centralized icon API, and the stable
//! `data-ui-*` DOM contract consumed by the site stylesheet. Page sections compose these
//! primitives instead of emitting ad hoc control markup.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

mod icon;
mod primitives;

pub use icon::{Icon, IconName, IconSize};
pub use primitives::{
    Badge, Button, ButtonSize, ButtonVariant, Card, Elevation, EmptyState, FieldVariant, Heading,
    IconButton, LayoutPadding, SurfaceVariant, TextArea, TextField,
};

