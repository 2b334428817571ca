use leptos::*;
use system_ui::{Icon, IconName, IconSize};

use crate::config::tribute_config;

#[component]
pub fn Footer() -> impl IntoView {
    let footer = &tribute_config().footer;
    view! {
        <footer class="wishbook-footer">
            <span class="wishbook-footer-cake">
                <Icon icon=IconName::Cake size=IconSize::Xl />
            </span>
            <h3 class="wishbook-footer-title">{footer.title.clone()}</h3>
            <p class="wishbook-footer-message">{footer.message.clone()}</p>
            <p class="wishbook-footer-signoff">{footer.sign_off.clone()}</p>
        </footer>
    }
}
