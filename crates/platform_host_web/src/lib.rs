//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side wiring layer for durable slots (`localStorage`), local
//! file picking, `FileReader` media encoding, `MediaRecorder` voice capture, and object-URL
//! previews. Every adapter compiles natively too, where it reports the capability as
//! unavailable instead of touching browser APIs.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod media;
pub mod storage;

pub use adapters::{build_host_services, host_capabilities};
pub use media::file_reader::WebMediaEncoder;
pub use media::picker::WebFilePicker;
pub use media::preview::WebPreviewService;
pub use media::recorder::WebAudioCapture;
pub use storage::local_slots::WebSlotStore;
