//! Media capture, encoding, and preview contracts.
//!
//! Browser adapters in `platform_host_web` hold the platform handles; everything here is
//! expressed in terms of [`MediaBlob`] so domain code never touches `web_sys` types.

mod blob;
mod capture;
mod encoder;
mod picker;
mod preview;

pub use blob::{BlobSource, MediaBlob};
pub use capture::{AudioCaptureService, CaptureFuture, ScriptedAudioCapture};
pub use encoder::{
    bytes_to_data_url, encode_media_with, is_self_contained, InlineMediaEncoder, MediaEncoder,
    MediaEncoderFuture,
};
pub use picker::{FilePickerFuture, FilePickerService, QueuedFilePicker};
pub use preview::{InlinePreviewService, PreviewService};
