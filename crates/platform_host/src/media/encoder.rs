use std::{future::Future, pin::Pin};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::{BlobSource, MediaBlob};

/// Object-safe boxed future used by [`MediaEncoder`].
pub type MediaEncoderFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

const DATA_URL_SCHEME: &str = "data:";
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Host service that turns a [`MediaBlob`] into a self-contained `data:` URL.
pub trait MediaEncoder {
    /// Encodes `blob`, suspending until the platform read completes.
    fn encode<'a>(&'a self, blob: &'a MediaBlob) -> MediaEncoderFuture<'a, Result<String, String>>;
}

/// Returns whether `reference` can be rendered without any external resource.
pub fn is_self_contained(reference: &str) -> bool {
    reference
        .get(..DATA_URL_SCHEME.len())
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case(DATA_URL_SCHEME))
}

/// Formats raw bytes as a base64 `data:` URL.
pub fn bytes_to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = match mime_type.trim() {
        "" => FALLBACK_MIME_TYPE,
        trimmed => trimmed,
    };
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// Encodes `blob` through `encoder`, passing already self-contained references through unchanged.
///
/// # Errors
///
/// Returns the encoder's error when the underlying read fails.
pub async fn encode_media_with<E: MediaEncoder + ?Sized>(
    encoder: &E,
    blob: &MediaBlob,
) -> Result<String, String> {
    if let BlobSource::Reference(reference) = &blob.source {
        if is_self_contained(reference) {
            return Ok(reference.clone());
        }
    }
    encoder.encode(blob).await
}

#[derive(Debug, Clone, Copy, Default)]
/// Pure-Rust encoder for blobs whose bytes are already in memory.
pub struct InlineMediaEncoder;

impl MediaEncoder for InlineMediaEncoder {
    fn encode<'a>(&'a self, blob: &'a MediaBlob) -> MediaEncoderFuture<'a, Result<String, String>> {
        Box::pin(async move {
            match &blob.source {
                BlobSource::Bytes(bytes) => Ok(bytes_to_data_url(&blob.mime_type, bytes)),
                BlobSource::Reference(reference) if is_self_contained(reference) => {
                    Ok(reference.clone())
                }
                BlobSource::Reference(_) => Err(format!(
                    "`{}` references external media and cannot be inlined",
                    blob.name
                )),
                BlobSource::Platform(_) => Err(format!(
                    "`{}` is a platform blob and needs a browser media encoder",
                    blob.name
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use futures::executor::block_on;

    use super::*;

    struct CountingEncoder {
        calls: Cell<usize>,
    }

    impl MediaEncoder for CountingEncoder {
        fn encode<'a>(
            &'a self,
            _blob: &'a MediaBlob,
        ) -> MediaEncoderFuture<'a, Result<String, String>> {
            self.calls.set(self.calls.get() + 1);
            Box::pin(async { Ok("data:text/plain;base64,".to_string()) })
        }
    }

    #[test]
    fn inline_encoder_produces_base64_data_url() {
        let blob = MediaBlob::from_bytes("hi.txt", "text/plain", b"hi".to_vec());
        let encoded = block_on(InlineMediaEncoder.encode(&blob)).expect("encode");
        assert_eq!(encoded, "data:text/plain;base64,aGk=");
    }

    #[test]
    fn missing_mime_type_falls_back_to_octet_stream() {
        assert_eq!(
            bytes_to_data_url(" ", &[0xff]),
            "data:application/octet-stream;base64,/w=="
        );
    }

    #[test]
    fn self_contained_reference_is_passed_through_without_encoding() {
        let encoder = CountingEncoder {
            calls: Cell::new(0),
        };
        let reference = "data:image/png;base64,iVBORw0KGgo=";
        let blob = MediaBlob::from_reference("photo.png", "image/png", reference);

        let encoded = block_on(encode_media_with(&encoder, &blob)).expect("pass through");
        assert_eq!(encoded, reference);
        assert_eq!(encoder.calls.get(), 0);
    }

    #[test]
    fn external_reference_is_rejected_by_inline_encoder() {
        let blob = MediaBlob::from_reference("clip.webm", "video/webm", "blob:https://site/1234");
        let err = block_on(encode_media_with(&InlineMediaEncoder, &blob)).expect_err("external");
        assert!(err.contains("clip.webm"), "{err}");
    }

    #[test]
    fn scheme_check_is_case_insensitive_and_short_input_safe() {
        assert!(is_self_contained("DATA:text/plain,hi"));
        assert!(!is_self_contained("dat"));
        assert!(!is_self_contained("https://example.test/a.png"));
    }
}
