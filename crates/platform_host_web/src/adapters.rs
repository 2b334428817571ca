use std::rc::Rc;

use platform_host::{CapabilityStatus, HostCapabilities, HostServices};

use crate::{WebAudioCapture, WebFilePicker, WebMediaEncoder, WebPreviewService, WebSlotStore};

/// Returns the capability posture of the current browser.
///
/// Microphone capture is reported unavailable when `navigator.mediaDevices` is missing, which
/// happens on insecure (non-HTTPS) origins.
pub fn host_capabilities() -> HostCapabilities {
    #[cfg(target_arch = "wasm32")]
    {
        let mut capabilities = HostCapabilities::browser();
        let has_media_devices = web_sys::window()
            .map(|window| window.navigator().media_devices().is_ok())
            .unwrap_or(false);
        if !has_media_devices {
            capabilities.audio_capture = CapabilityStatus::Unavailable;
        }
        capabilities
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        HostCapabilities {
            file_picker: CapabilityStatus::Unavailable,
            audio_capture: CapabilityStatus::Unavailable,
        }
    }
}

/// Assembles the browser host service bundle injected into the wishbook runtime.
pub fn build_host_services() -> HostServices {
    HostServices {
        slots: Rc::new(WebSlotStore),
        encoder: Rc::new(WebMediaEncoder),
        picker: Rc::new(WebFilePicker),
        audio: Rc::new(WebAudioCapture::default()),
        previews: Rc::new(WebPreviewService),
        capabilities: host_capabilities(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_build_reports_no_browser_capabilities() {
        let capabilities = host_capabilities();
        assert!(!capabilities.file_picker.is_offered());
        assert!(!capabilities.audio_capture.is_offered());
    }

    #[test]
    fn native_slot_store_reads_nothing_and_accepts_writes() {
        let store = WebSlotStore;
        assert_eq!(store.read_raw("digital-wishbook-wishes"), Ok(None));
        assert_eq!(store.write_raw("digital-wishbook-wishes", "[]"), Ok(()));
        assert_eq!(store.remove_raw("digital-wishbook-wishes"), Ok(()));
    }
}
