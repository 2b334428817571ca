use std::time::Duration;

use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};
use leptos::*;
use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    config::tribute_config,
    presentation::{generate_particles, CelebrationSchedule, Particle},
};

#[component]
/// Full-screen burst of falling glyphs, shown on the configured schedule.
pub fn FallingNumbers() -> impl IntoView {
    let celebration = &tribute_config().celebration;
    let schedule = CelebrationSchedule::from(celebration);
    let glyphs = store_value(celebration.glyphs.clone());
    let particle_count = celebration.particle_count as usize;

    let rng = store_value(SmallRng::from_entropy());
    let burst = create_rw_signal(None::<(u64, Vec<Particle>)>);
    let burst_counter = store_value(0u64);
    let repeat_handle = store_value(None::<IntervalHandle>);
    let hide_handle = store_value(None::<TimeoutHandle>);

    let start_burst = move || {
        let particles = glyphs
            .with_value(|glyphs| {
                rng.try_update_value(|rng| generate_particles(rng, glyphs, particle_count))
            })
            .unwrap_or_default();
        let key = burst_counter.get_value();
        burst_counter.set_value(key + 1);
        burst.set(Some((key, particles)));

        if let Some(previous) = hide_handle.get_value() {
            previous.clear();
        }
        let hidden = set_timeout_with_handle(
            move || burst.set(None),
            Duration::from_millis(u64::from(schedule.visible_ms)),
        );
        hide_handle.set_value(hidden.ok());
    };

    let first = set_timeout_with_handle(
        move || {
            start_burst();
            let repeat = set_interval_with_handle(
                start_burst,
                Duration::from_millis(u64::from(schedule.repeat_ms)),
            );
            repeat_handle.set_value(repeat.ok());
        },
        Duration::from_millis(u64::from(schedule.first_delay_ms)),
    );

    on_cleanup(move || {
        if let Ok(first) = first {
            first.clear();
        }
        if let Some(repeat) = repeat_handle.get_value() {
            repeat.clear();
        }
        if let Some(hide) = hide_handle.get_value() {
            hide.clear();
        }
    });

    move || {
        burst.get().map(|(key, particles)| {
            view! {
                <div class="wishbook-celebration" aria-hidden="true" data-burst=key>
                    {particles
                        .into_iter()
                        .map(|particle| {
                            view! {
                                <span class="wishbook-particle" style=particle.style()>
                                    {particle.glyph.clone()}
                                </span>
                            }
                        })
                        .collect_view()}
                </div>
            }
        })
    }
}
