use std::time::Duration;

use leptos::*;
use system_ui::{Button, ButtonSize, ButtonVariant, Icon, IconName, IconSize};

use crate::{config::tribute_config, presentation::Carousel};

#[component]
pub fn Hero() -> impl IntoView {
    let config = tribute_config();
    let images = config.hero.images.clone();
    let carousel = create_rw_signal(Carousel::new(images.len()));

    if !images.is_empty() {
        if let Ok(interval) = set_interval_with_handle(
            move || carousel.update(Carousel::advance),
            Duration::from_millis(u64::from(config.hero.interval_ms)),
        ) {
            on_cleanup(move || interval.clear());
        }
    }

    let slide_images = images.clone();
    let current_image = move || {
        let index = carousel.with(Carousel::current);
        slide_images.get(index).cloned().unwrap_or_default()
    };

    let dots = (0..images.len())
        .map(|index| {
            view! {
                <Button
                    variant=ButtonVariant::Quiet
                    size=ButtonSize::Sm
                    layout_class="wishbook-dot"
                    aria_label=format!("Show photo {}", index + 1)
                    pressed=Signal::derive(move || carousel.with(Carousel::current) == index)
                    on_click=Callback::new(move |_| carousel.update(|c| c.select(index)))
                >
                    <span class="wishbook-sr-only">{index + 1}</span>
                </Button>
            }
        })
        .collect_view();

    view! {
        <section class="wishbook-hero">
            <div class="wishbook-hero-media">
                <Show when=move || !carousel.with(Carousel::is_empty)>
                    <div class="wishbook-hero-frame">
                        <img class="wishbook-hero-image" src=current_image.clone() alt="Birthday Celebration" />
                    </div>
                </Show>
                <div class="wishbook-hero-dots">{dots}</div>
                <span class="wishbook-hero-badge">
                    <Icon icon=IconName::Cake size=IconSize::Md />
                </span>
            </div>
            <div class="wishbook-hero-text">
                <p class="wishbook-kicker">
                    <Icon icon=IconName::PartyPopper />
                    "Happy Birthday!"
                    <Icon icon=IconName::PartyPopper />
                </p>
                <h1 class="wishbook-hero-title">{config.honoree_title.clone()}</h1>
                <p class="wishbook-hero-tagline">{config.tagline.clone()}</p>
                <a class="wishbook-cta" href="#wishes">
                    <Icon icon=IconName::Cake />
                    "Send Birthday Wishes"
                </a>
            </div>
        </section>
    }
}
