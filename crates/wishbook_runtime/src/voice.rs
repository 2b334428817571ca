//! Voice-note capture session over an [`AudioCaptureService`].

use std::{cell::Cell, rc::Rc};

use platform_host::{AudioCaptureService, MediaBlob};

use crate::error::WishError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Where a voice session currently is.
pub enum VoicePhase {
    /// Nothing recorded in this session yet, or the last attempt failed.
    #[default]
    Idle,
    /// Waiting on the host to grant the microphone.
    Starting,
    /// Microphone open and recording.
    Recording,
    /// A clip was finalized and handed back.
    Stopped,
}

#[derive(Clone)]
/// Drives `Idle -> Starting -> Recording -> Stopped` over the host capture service.
///
/// Failures return the session to `Idle`; no partial recording is ever surfaced.
pub struct VoiceSession {
    capture: Rc<dyn AudioCaptureService>,
    phase: Rc<Cell<VoicePhase>>,
}

impl VoiceSession {
    pub fn new(capture: Rc<dyn AudioCaptureService>) -> Self {
        Self {
            capture,
            phase: Rc::default(),
        }
    }

    pub fn phase(&self) -> VoicePhase {
        self.phase.get()
    }

    pub fn is_recording(&self) -> bool {
        self.phase() == VoicePhase::Recording
    }

    pub fn is_starting(&self) -> bool {
        self.phase() == VoicePhase::Starting
    }

    /// Opens the microphone and starts recording.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Capture`] when a recording is already starting or running, or the
    /// host refuses access.
    pub async fn start(&self) -> Result<(), WishError> {
        match self.phase() {
            VoicePhase::Starting => {
                return Err(WishError::Capture("a recording is already starting".to_string()))
            }
            VoicePhase::Recording => {
                return Err(WishError::Capture("a recording is already running".to_string()))
            }
            VoicePhase::Idle | VoicePhase::Stopped => {}
        }
        self.phase.set(VoicePhase::Starting);
        match self.capture.start_capture().await {
            Ok(()) => {
                self.phase.set(VoicePhase::Recording);
                Ok(())
            }
            Err(reason) => {
                self.phase.set(VoicePhase::Idle);
                Err(WishError::Capture(reason))
            }
        }
    }

    /// Stops recording and returns the finalized clip.
    ///
    /// # Errors
    ///
    /// Returns [`WishError::Capture`] when nothing is recording or the recorder fails to
    /// finalize.
    pub async fn stop(&self) -> Result<MediaBlob, WishError> {
        if !self.is_recording() {
            return Err(WishError::Capture("no recording is running".to_string()));
        }
        match self.capture.stop_capture().await {
            Ok(clip) => {
                self.phase.set(VoicePhase::Stopped);
                Ok(clip)
            }
            Err(reason) => {
                self.phase.set(VoicePhase::Idle);
                Err(WishError::Capture(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        future::Future,
        task::{Context, Poll},
    };

    use futures::{channel::oneshot, executor::block_on, task::noop_waker};
    use platform_host::{CaptureFuture, ScriptedAudioCapture};
    use pretty_assertions::assert_eq;

    use super::*;

    /// Capture service whose first start waits until the test opens the gate.
    struct GatedCapture {
        starts: Cell<usize>,
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    impl AudioCaptureService for GatedCapture {
        fn start_capture<'a>(&'a self) -> CaptureFuture<'a, Result<(), String>> {
            Box::pin(async move {
                self.starts.set(self.starts.get() + 1);
                let gate = self.gate.borrow_mut().take();
                if let Some(gate) = gate {
                    let _ = gate.await;
                }
                Ok(())
            })
        }

        fn stop_capture<'a>(&'a self) -> CaptureFuture<'a, Result<MediaBlob, String>> {
            Box::pin(async {
                Ok(MediaBlob::from_bytes(
                    "voice-note.webm",
                    "audio/webm",
                    vec![1u8],
                ))
            })
        }
    }

    #[test]
    fn second_start_while_microphone_is_pending_never_reaches_the_host() {
        let (open, gate) = oneshot::channel();
        let capture = Rc::new(GatedCapture {
            starts: Cell::new(0),
            gate: RefCell::new(Some(gate)),
        });
        let session = VoiceSession::new(capture.clone());

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        let mut first = Box::pin(session.start());
        assert!(matches!(first.as_mut().poll(&mut cx), Poll::Pending));
        assert_eq!(session.phase(), VoicePhase::Starting);

        let second = block_on(session.start());
        assert!(matches!(second, Err(WishError::Capture(_))));
        assert_eq!(capture.starts.get(), 1);

        open.send(()).expect("gate open");
        block_on(first).expect("first start");
        assert_eq!(session.phase(), VoicePhase::Recording);
        assert_eq!(capture.starts.get(), 1);
    }

    #[test]
    fn start_then_stop_yields_a_clip() {
        let capture = ScriptedAudioCapture::with_clip(vec![7u8; 32]);
        let session = VoiceSession::new(Rc::new(capture.clone()));

        block_on(session.start()).expect("start");
        assert_eq!(session.phase(), VoicePhase::Recording);
        assert!(capture.is_active());

        let clip = block_on(session.stop()).expect("stop");
        assert_eq!(session.phase(), VoicePhase::Stopped);
        assert_eq!(clip.size, 32);
        assert_eq!(clip.mime_type, "audio/webm");
        assert!(!capture.is_active());
    }

    #[test]
    fn denied_microphone_is_a_capture_error_and_stays_idle() {
        let session = VoiceSession::new(Rc::new(ScriptedAudioCapture::denied("NotAllowedError")));
        let err = block_on(session.start()).expect_err("denied");
        assert_eq!(err, WishError::Capture("NotAllowedError".to_string()));
        assert_eq!(session.phase(), VoicePhase::Idle);
    }

    #[test]
    fn stop_without_start_is_rejected() {
        let session = VoiceSession::new(Rc::new(ScriptedAudioCapture::with_clip(vec![1u8])));
        assert!(matches!(block_on(session.stop()), Err(WishError::Capture(_))));
        assert_eq!(session.phase(), VoicePhase::Idle);
    }
}
