use std::time::Duration;

use leptos::*;
use system_ui::{Button, ButtonSize, ButtonVariant, Card, Elevation, Heading};

use crate::{config::tribute_config, presentation::Carousel};

#[component]
pub fn About() -> impl IntoView {
    let config = tribute_config();
    let tributes = config.about.tributes.clone();
    let carousel = create_rw_signal(Carousel::new(tributes.len()));

    if !tributes.is_empty() {
        if let Ok(interval) = set_interval_with_handle(
            move || carousel.update(Carousel::advance),
            Duration::from_millis(u64::from(config.about.interval_ms)),
        ) {
            on_cleanup(move || interval.clear());
        }
    }

    let slides = tributes.clone();
    let current = move || {
        let index = carousel.with(Carousel::current);
        slides.get(index).cloned().map(|tribute| {
            view! {
                <div class="wishbook-tribute" data-index=index>
                    <img class="wishbook-tribute-portrait" src=tribute.image alt=tribute.role.clone() />
                    <h3 class="wishbook-tribute-role">{tribute.role}</h3>
                    <p class="wishbook-tribute-statement">{format!("\"{}\"", tribute.statement)}</p>
                </div>
            }
        })
    };

    let indicators = tributes
        .into_iter()
        .enumerate()
        .map(|(index, tribute)| {
            view! {
                <Button
                    variant=ButtonVariant::Quiet
                    size=ButtonSize::Sm
                    layout_class="wishbook-dot"
                    aria_label=tribute.role.clone()
                    pressed=Signal::derive(move || carousel.with(Carousel::current) == index)
                    on_click=Callback::new(move |_| carousel.update(|c| c.select(index)))
                >
                    <span class="wishbook-sr-only">{tribute.role.clone()}</span>
                </Button>
            }
        })
        .collect_view();

    view! {
        <section class="wishbook-about">
            <Heading layout_class="wishbook-section-heading">{config.about.heading.clone()}</Heading>
            <p class="wishbook-section-lede">{config.about.subheading.clone()}</p>
            <Card elevation=Elevation::Overlay layout_class="wishbook-phone-card">
                <span class="wishbook-phone-notch"></span>
                {current}
                <div class="wishbook-tribute-dots">{indicators}</div>
            </Card>
        </section>
    }
}
