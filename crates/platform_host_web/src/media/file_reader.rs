//! `FileReader`-backed media encoder.

use platform_host::{BlobSource, InlineMediaEncoder, MediaBlob, MediaEncoder, MediaEncoderFuture};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser media encoder: platform blobs go through `FileReader.readAsDataURL`, in-memory bytes
/// through [`InlineMediaEncoder`].
pub struct WebMediaEncoder;

impl MediaEncoder for WebMediaEncoder {
    fn encode<'a>(&'a self, blob: &'a MediaBlob) -> MediaEncoderFuture<'a, Result<String, String>> {
        Box::pin(async move {
            match &blob.source {
                BlobSource::Platform(handle) => read_platform_blob(&blob.name, handle).await,
                BlobSource::Bytes(_) | BlobSource::Reference(_) => {
                    InlineMediaEncoder.encode(blob).await
                }
            }
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_platform_blob(name: &str, _handle: &wasm_bindgen::JsValue) -> Result<String, String> {
    Err(format!("`{name}` can only be read when compiled for wasm32"))
}

#[cfg(target_arch = "wasm32")]
async fn read_platform_blob(name: &str, handle: &wasm_bindgen::JsValue) -> Result<String, String> {
    let blob = handle
        .dyn_ref::<web_sys::Blob>()
        .ok_or_else(|| format!("`{name}` is not a browser Blob"))?;
    read_blob_as_data_url(name, blob).await
}

#[cfg(target_arch = "wasm32")]
async fn read_blob_as_data_url(name: &str, blob: &web_sys::Blob) -> Result<String, String> {
    let reader = web_sys::FileReader::new().map_err(|err| format!("{err:?}"))?;
    let (tx, rx) = oneshot::channel::<Result<String, String>>();
    let sender = Rc::new(RefCell::new(Some(tx)));

    let reader_for_load = reader.clone();
    let load_sender = sender.clone();
    let load_name = name.to_string();
    let on_load = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        let result = reader_for_load
            .result()
            .map_err(|err| format!("failed to read `{load_name}`: {err:?}"))
            .and_then(|value| {
                value
                    .as_string()
                    .ok_or_else(|| "file reader returned non-string result".to_string())
            });
        if let Some(tx) = load_sender.borrow_mut().take() {
            let _ = tx.send(result);
        }
    }));
    reader.set_onload(Some(on_load.as_ref().unchecked_ref()));

    let error_sender = sender.clone();
    let error_name = name.to_string();
    let on_error = Closure::<dyn FnMut(web_sys::ProgressEvent)>::wrap(Box::new(move |_| {
        if let Some(tx) = error_sender.borrow_mut().take() {
            let _ = tx.send(Err(format!("failed to load `{error_name}`")));
        }
    }));
    reader.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    reader
        .read_as_data_url(blob)
        .map_err(|err| format!("failed to start file read: {err:?}"))?;

    let result = rx
        .await
        .map_err(|_| format!("read of `{name}` was interrupted"))?;
    drop(on_load);
    drop(on_error);
    result
}
