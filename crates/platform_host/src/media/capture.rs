use std::{cell::Cell, future::Future, pin::Pin, rc::Rc};

use super::MediaBlob;

/// Object-safe boxed future used by [`AudioCaptureService`].
pub type CaptureFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for live microphone capture.
///
/// A capture runs between one `start_capture` and the following `stop_capture`; stopping yields
/// the finalized recording as a single blob.
pub trait AudioCaptureService {
    /// Requests microphone access and begins recording.
    fn start_capture<'a>(&'a self) -> CaptureFuture<'a, Result<(), String>>;

    /// Stops the active recording and returns the finalized clip.
    fn stop_capture<'a>(&'a self) -> CaptureFuture<'a, Result<MediaBlob, String>>;
}

#[derive(Debug, Clone)]
/// Capture service that replays a fixed clip, or always refuses access.
pub struct ScriptedAudioCapture {
    clip: Result<Rc<[u8]>, String>,
    active: Rc<Cell<bool>>,
}

impl ScriptedAudioCapture {
    /// Returns `clip` from every completed capture.
    pub fn with_clip(clip: impl Into<Rc<[u8]>>) -> Self {
        Self {
            clip: Ok(clip.into()),
            active: Rc::default(),
        }
    }

    /// Refuses every capture with `reason`, like a denied microphone permission.
    pub fn denied(reason: impl Into<String>) -> Self {
        Self {
            clip: Err(reason.into()),
            active: Rc::default(),
        }
    }

    /// Returns whether a capture is currently running.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

impl AudioCaptureService for ScriptedAudioCapture {
    fn start_capture<'a>(&'a self) -> CaptureFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if let Err(reason) = &self.clip {
                return Err(reason.clone());
            }
            if self.active.replace(true) {
                return Err("a capture is already running".to_string());
            }
            Ok(())
        })
    }

    fn stop_capture<'a>(&'a self) -> CaptureFuture<'a, Result<MediaBlob, String>> {
        Box::pin(async move {
            if !self.active.replace(false) {
                return Err("no capture is running".to_string());
            }
            let clip = self.clip.clone()?;
            Ok(MediaBlob::from_bytes("voice-note.webm", "audio/webm", clip))
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;

    #[test]
    fn scripted_capture_yields_clip_on_stop() {
        let capture = ScriptedAudioCapture::with_clip(vec![1u8, 2, 3]);
        block_on(capture.start_capture()).expect("start");
        assert!(capture.is_active());
        let blob = block_on(capture.stop_capture()).expect("stop");
        assert_eq!(blob.size, 3);
        assert_eq!(blob.mime_type, "audio/webm");
        assert!(!capture.is_active());
    }

    #[test]
    fn stop_without_start_fails() {
        let capture = ScriptedAudioCapture::with_clip(vec![1u8]);
        assert!(block_on(capture.stop_capture()).is_err());
    }

    #[test]
    fn denied_capture_never_starts() {
        let capture = ScriptedAudioCapture::denied("Permission denied");
        let err = block_on(capture.start_capture()).expect_err("denied");
        assert_eq!(err, "Permission denied");
        assert!(!capture.is_active());
    }
}
