use super::{bytes_to_data_url, BlobSource, MediaBlob};

/// Host service that exposes short-lived preview URLs for attachments awaiting submission.
///
/// Every URL handed out by [`PreviewService::create_preview`] must eventually be passed to
/// [`PreviewService::release_preview`].
pub trait PreviewService {
    /// Creates a renderable URL for `blob`, or `None` when the host cannot preview it.
    fn create_preview(&self, blob: &MediaBlob) -> Option<String>;

    /// Releases a URL created by [`PreviewService::create_preview`].
    fn release_preview(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default)]
/// Preview service that renders in-memory blobs as `data:` URLs, which need no release.
pub struct InlinePreviewService;

impl PreviewService for InlinePreviewService {
    fn create_preview(&self, blob: &MediaBlob) -> Option<String> {
        match &blob.source {
            BlobSource::Bytes(bytes) => Some(bytes_to_data_url(&blob.mime_type, bytes)),
            BlobSource::Reference(reference) => Some(reference.clone()),
            BlobSource::Platform(_) => None,
        }
    }

    fn release_preview(&self, _url: &str) {}
}
