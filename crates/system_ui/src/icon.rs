//! Centralized icon API.
//!
//! Icons render as glyph spans tagged with `data-ui-icon` so the stylesheet can swap in artwork
//! without touching component markup.

use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Icons used across the page.
pub enum IconName {
    /// Birthday cake.
    Cake,
    /// Party popper.
    PartyPopper,
    /// Wrapped gift.
    Gift,
    /// Photo attachment.
    Image,
    /// Video attachment.
    Video,
    /// Voice note.
    Mic,
    /// Text-only wish.
    Message,
    /// Submit.
    Send,
    /// In-progress spinner.
    Spinner,
    /// Delete.
    Trash,
    /// Edit.
    Pencil,
    /// Confirm.
    Check,
    /// Dismiss or remove.
    Close,
}

impl IconName {
    /// Returns the stable `data-ui-icon` token.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Cake => "cake",
            Self::PartyPopper => "party-popper",
            Self::Gift => "gift",
            Self::Image => "image",
            Self::Video => "video",
            Self::Mic => "mic",
            Self::Message => "message",
            Self::Send => "send",
            Self::Spinner => "spinner",
            Self::Trash => "trash",
            Self::Pencil => "pencil",
            Self::Check => "check",
            Self::Close => "close",
        }
    }

    const fn glyph(self) -> &'static str {
        match self {
            Self::Cake => "\u{1F382}",
            Self::PartyPopper => "\u{1F389}",
            Self::Gift => "\u{1F381}",
            Self::Image => "\u{1F5BC}",
            Self::Video => "\u{1F3AC}",
            Self::Mic => "\u{1F3A4}",
            Self::Message => "\u{1F4AC}",
            Self::Send => "\u{27A4}",
            Self::Spinner => "\u{21BB}",
            Self::Trash => "\u{1F5D1}",
            Self::Pencil => "\u{270E}",
            Self::Check => "\u{2713}",
            Self::Close => "\u{2715}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Icon sizing tokens.
pub enum IconSize {
    /// Inline with dense text.
    Xs,
    /// Inline with body text.
    #[default]
    Sm,
    /// Standalone.
    Md,
    /// Hero/empty-state artwork.
    Xl,
}

impl IconSize {
    const fn token(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Xl => "xl",
        }
    }
}

#[component]
/// Decorative icon glyph. Hidden from assistive technology.
pub fn Icon(
    icon: IconName,
    #[prop(default = IconSize::Sm)] size: IconSize,
    #[prop(optional)] spin: bool,
) -> impl IntoView {
    view! {
        <span
            class="ui-icon"
            aria-hidden="true"
            data-ui-icon=icon.token()
            data-ui-size=size.token()
            data-ui-spin=if spin { "true" } else { "false" }
        >
            {icon.glyph()}
        </span>
    }
}
