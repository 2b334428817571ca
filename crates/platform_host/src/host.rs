//! Host service bundle and capability posture injected into the wishbook runtime.

use std::rc::Rc;

use crate::{AudioCaptureService, FilePickerService, MediaEncoder, PreviewService, SlotStore};

/// Host availability state for one optional capability domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityStatus {
    /// Capability is available.
    Available,
    /// Capability is not supported on the active host.
    Unavailable,
    /// Capability exists but needs an explicit permission grant first.
    RequiresUserActivation,
}

impl CapabilityStatus {
    /// Returns whether the capability can be offered in the UI.
    pub const fn is_offered(self) -> bool {
        !matches!(self, Self::Unavailable)
    }
}

/// Host capability snapshot consulted by the UI before offering optional controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    /// Local file picking for photo/video attachments.
    pub file_picker: CapabilityStatus,
    /// Live microphone capture for voice notes.
    pub audio_capture: CapabilityStatus,
}

impl HostCapabilities {
    /// Browser capability posture.
    pub const fn browser() -> Self {
        Self {
            file_picker: CapabilityStatus::Available,
            audio_capture: CapabilityStatus::RequiresUserActivation,
        }
    }
}

/// Host service bundle assembled by the entry layer and handed to the runtime.
///
/// All environment-specific selection happens before this bundle crosses into
/// `wishbook_runtime`, which keeps the domain code free of browser types.
#[derive(Clone)]
pub struct HostServices {
    /// Durable string-keyed slot store.
    pub slots: Rc<dyn SlotStore>,
    /// Binary-to-`data:` URL encoder.
    pub encoder: Rc<dyn MediaEncoder>,
    /// Local file picker.
    pub picker: Rc<dyn FilePickerService>,
    /// Live microphone capture.
    pub audio: Rc<dyn AudioCaptureService>,
    /// Attachment preview URLs.
    pub previews: Rc<dyn PreviewService>,
    /// Capability posture.
    pub capabilities: HostCapabilities,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unavailable_capabilities_are_hidden() {
        let browser = HostCapabilities::browser();
        assert!(browser.file_picker.is_offered());
        assert!(browser.audio_capture.is_offered());
        assert!(!CapabilityStatus::Unavailable.is_offered());
    }
}
