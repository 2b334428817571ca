//! Page composition: hero, about card, wishes section, footer, celebration overlay, and toasts.

mod about;
mod falling_numbers;
mod footer;
mod hero;
mod toasts;
mod wish_form;
mod wish_gallery;
mod wishes_section;

use leptos::*;

pub use self::{
    about::About, falling_numbers::FallingNumbers, footer::Footer, hero::Hero,
    toasts::ToastViewport, wish_form::WishForm, wish_gallery::WishGallery,
    wishes_section::WishesSection,
};

pub use crate::runtime_context::{use_wishbook_runtime, WishbookProvider, WishbookRuntimeContext};

#[component]
/// The full single-page tribute. Must be rendered inside [`WishbookProvider`].
pub fn WishbookPage() -> impl IntoView {
    view! {
        <main class="wishbook-page">
            <FallingNumbers />
            <Hero />
            <About />
            <WishesSection />
            <Footer />
            <ToastViewport />
        </main>
    }
}
