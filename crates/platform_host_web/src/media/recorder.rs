//! `MediaRecorder`-backed microphone capture.

use platform_host::{AudioCaptureService, CaptureFuture, MediaBlob};

#[cfg(target_arch = "wasm32")]
use futures::channel::oneshot;
#[cfg(target_arch = "wasm32")]
use std::{cell::RefCell, rc::Rc};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;

#[cfg(target_arch = "wasm32")]
const VOICE_NOTE_MIME_TYPE: &str = "audio/webm";
#[cfg(target_arch = "wasm32")]
const VOICE_NOTE_FILE_NAME: &str = "voice-note.webm";

#[cfg(target_arch = "wasm32")]
struct ActiveRecording {
    recorder: web_sys::MediaRecorder,
    stream: web_sys::MediaStream,
    chunks: Rc<RefCell<Vec<web_sys::Blob>>>,
    _on_data: Closure<dyn FnMut(web_sys::BlobEvent)>,
}

#[derive(Clone, Default)]
/// Browser microphone capture using `getUserMedia` and `MediaRecorder`.
///
/// Recorded chunks are buffered in memory and joined into one `audio/webm` blob on stop. The
/// microphone tracks are released as soon as the recording is finalized.
pub struct WebAudioCapture {
    #[cfg(target_arch = "wasm32")]
    active: Rc<RefCell<Option<ActiveRecording>>>,
}

impl AudioCaptureService for WebAudioCapture {
    fn start_capture<'a>(&'a self) -> CaptureFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                if self.active.borrow().is_some() {
                    return Err("a voice recording is already running".to_string());
                }
                let recording = begin_recording().await?;
                let mut active = self.active.borrow_mut();
                if active.is_some() {
                    // Another start won the microphone while this one was pending.
                    discard_recording(&recording);
                    return Err("a voice recording is already running".to_string());
                }
                *active = Some(recording);
                Ok(())
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                Err("microphone capture is only available when compiled for wasm32".to_string())
            }
        })
    }

    fn stop_capture<'a>(&'a self) -> CaptureFuture<'a, Result<MediaBlob, String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let recording = self
                    .active
                    .borrow_mut()
                    .take()
                    .ok_or_else(|| "no voice recording is running".to_string())?;
                finish_recording(recording).await
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                Err("microphone capture is only available when compiled for wasm32".to_string())
            }
        })
    }
}

#[cfg(target_arch = "wasm32")]
async fn begin_recording() -> Result<ActiveRecording, String> {
    let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
    let devices = window
        .navigator()
        .media_devices()
        .map_err(|err| format!("media devices unavailable: {err:?}"))?;
    let constraints = web_sys::MediaStreamConstraints::new();
    constraints.set_audio(&JsValue::TRUE);
    let request = devices
        .get_user_media_with_constraints(&constraints)
        .map_err(|err| format!("microphone request failed: {err:?}"))?;
    let stream = JsFuture::from(request)
        .await
        .map_err(|err| format!("microphone access denied: {err:?}"))?
        .dyn_into::<web_sys::MediaStream>()
        .map_err(|_| "getUserMedia returned a non-stream value".to_string())?;

    let recorder = match web_sys::MediaRecorder::new_with_media_stream(&stream) {
        Ok(recorder) => recorder,
        Err(err) => {
            release_tracks(&stream);
            return Err(format!("failed to create media recorder: {err:?}"));
        }
    };

    let chunks = Rc::new(RefCell::new(Vec::new()));
    let data_chunks = chunks.clone();
    let on_data = Closure::<dyn FnMut(web_sys::BlobEvent)>::wrap(Box::new(
        move |event: web_sys::BlobEvent| {
            if let Some(data) = event.data() {
                data_chunks.borrow_mut().push(data);
            }
        },
    ));
    recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

    if let Err(err) = recorder.start() {
        release_tracks(&stream);
        return Err(format!("failed to start media recorder: {err:?}"));
    }

    Ok(ActiveRecording {
        recorder,
        stream,
        chunks,
        _on_data: on_data,
    })
}

#[cfg(target_arch = "wasm32")]
async fn finish_recording(recording: ActiveRecording) -> Result<MediaBlob, String> {
    let (tx, rx) = oneshot::channel::<()>();
    let sender = Rc::new(RefCell::new(Some(tx)));
    let on_stop = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        if let Some(tx) = sender.borrow_mut().take() {
            let _ = tx.send(());
        }
    }));
    recording
        .recorder
        .set_onstop(Some(on_stop.as_ref().unchecked_ref()));

    let stopped = recording
        .recorder
        .stop()
        .map_err(|err| format!("failed to stop media recorder: {err:?}"));
    if stopped.is_ok() {
        let _ = rx.await;
    }
    release_tracks(&recording.stream);
    drop(on_stop);
    stopped?;

    let parts = js_sys::Array::new();
    for chunk in recording.chunks.borrow().iter() {
        parts.push(chunk);
    }
    let mime_type = match recording.recorder.mime_type() {
        reported if reported.trim().is_empty() => VOICE_NOTE_MIME_TYPE.to_string(),
        reported => reported,
    };
    let options = web_sys::BlobPropertyBag::new();
    options.set_type(&mime_type);
    let blob = web_sys::Blob::new_with_blob_sequence_and_options(&parts, &options)
        .map_err(|err| format!("failed to assemble voice note: {err:?}"))?;

    let size = blob.size().max(0.0) as u64;
    Ok(MediaBlob::from_platform(
        VOICE_NOTE_FILE_NAME,
        mime_type,
        size,
        blob.into(),
    ))
}

#[cfg(target_arch = "wasm32")]
fn discard_recording(recording: &ActiveRecording) {
    let _ = recording.recorder.stop();
    release_tracks(&recording.stream);
}

#[cfg(target_arch = "wasm32")]
fn release_tracks(stream: &web_sys::MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<web_sys::MediaStreamTrack>() {
            track.stop();
        }
    }
}
