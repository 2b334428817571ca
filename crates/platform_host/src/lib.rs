//! Typed host-domain contracts and shared models used by the wishbook runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services: durable slots, media encoding,
//! file picking, microphone capture, attachment previews, and notifications. Concrete browser
//! adapters live in `platform_host_web`; the in-memory adapters here back tests and non-wasm
//! builds.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod host;
pub mod media;
pub mod notifications;
pub mod storage;
pub mod time;

pub use host::{CapabilityStatus, HostCapabilities, HostServices};
pub use media::{
    bytes_to_data_url, encode_media_with, is_self_contained, AudioCaptureService, BlobSource,
    CaptureFuture, FilePickerFuture, FilePickerService, InlineMediaEncoder, InlinePreviewService,
    MediaBlob, MediaEncoder, MediaEncoderFuture, PreviewService, QueuedFilePicker,
    ScriptedAudioCapture,
};
pub use notifications::{
    MemoryNotificationService, Notice, NoticeLevel, NotificationFuture,
    NotificationService,
};
pub use storage::{read_slot_with, write_slot_with, MemorySlotStore, SlotStore, SlotStoreFuture};
pub use time::{new_record_id, new_visitor_id, unix_time_ms_now, utc_now_ms};
