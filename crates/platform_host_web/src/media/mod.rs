//! Browser media adapters: file picking, `FileReader` encoding, `MediaRecorder` capture, and
//! object-URL previews.

pub mod file_reader;
pub mod picker;
pub mod preview;
pub mod recorder;
