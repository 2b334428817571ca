use std::rc::Rc;

use wasm_bindgen::JsValue;

#[derive(Debug, Clone)]
/// Where the bytes of a [`MediaBlob`] live.
pub enum BlobSource {
    /// Bytes already held in wasm/native memory.
    Bytes(Rc<[u8]>),
    /// A textual reference (for example a `data:` URL from an earlier encode).
    Reference(String),
    /// An opaque browser `Blob`/`File` handle owned by the platform adapter.
    Platform(JsValue),
}

#[derive(Debug, Clone)]
/// A captured or picked binary file awaiting encoding.
pub struct MediaBlob {
    /// File name reported by the picker or recorder.
    pub name: String,
    /// MIME type, possibly empty when the platform could not determine it.
    pub mime_type: String,
    /// Size in bytes as reported by the platform.
    pub size: u64,
    /// Backing storage.
    pub source: BlobSource,
}

impl MediaBlob {
    /// Wraps in-memory bytes.
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Rc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            source: BlobSource::Bytes(bytes),
        }
    }

    /// Wraps an existing textual reference.
    pub fn from_reference(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        let reference = reference.into();
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: reference.len() as u64,
            source: BlobSource::Reference(reference),
        }
    }

    /// Wraps a platform handle whose size was reported separately.
    pub fn from_platform(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        handle: JsValue,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
            source: BlobSource::Platform(handle),
        }
    }

    /// Builds a blob of `size` zero bytes. Handy for exercising size ceilings.
    pub fn zeroed(name: impl Into<String>, mime_type: impl Into<String>, size: usize) -> Self {
        Self::from_bytes(name, mime_type, vec![0u8; size])
    }
}
