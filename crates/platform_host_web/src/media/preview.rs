//! Object-URL previews for attachments awaiting submission.

use platform_host::{BlobSource, InlinePreviewService, MediaBlob, PreviewService};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, Default)]
/// Browser preview service: platform blobs get `blob:` object URLs that are revoked on release.
pub struct WebPreviewService;

impl PreviewService for WebPreviewService {
    fn create_preview(&self, blob: &MediaBlob) -> Option<String> {
        match &blob.source {
            #[cfg(target_arch = "wasm32")]
            BlobSource::Platform(handle) => {
                let platform_blob = handle.dyn_ref::<web_sys::Blob>()?;
                web_sys::Url::create_object_url_with_blob(platform_blob).ok()
            }
            #[cfg(not(target_arch = "wasm32"))]
            BlobSource::Platform(_) => None,
            BlobSource::Bytes(_) | BlobSource::Reference(_) => {
                InlinePreviewService.create_preview(blob)
            }
        }
    }

    fn release_preview(&self, url: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            if url.starts_with("blob:") {
                let _ = web_sys::Url::revoke_object_url(url);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
        }
    }
}
