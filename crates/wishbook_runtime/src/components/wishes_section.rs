use leptos::*;
use system_ui::{Badge, Heading, IconName};

use super::{WishForm, WishGallery};

#[component]
pub fn WishesSection() -> impl IntoView {
    view! {
        <section id="wishes" class="wishbook-wishes">
            <div class="wishbook-wishes-intro">
                <Badge icon=IconName::Gift>"Birthday Wishes"</Badge>
                <Heading layout_class="wishbook-section-heading">"Celebrate This Special Day"</Heading>
                <p class="wishbook-section-lede">
                    "Share your messages, voice notes, photos, and videos to make this birthday special!"
                </p>
            </div>
            <WishForm />
            <WishGallery />
        </section>
    }
}
