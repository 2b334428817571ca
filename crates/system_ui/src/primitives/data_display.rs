use super::*;

#[component]
/// Shared card surface.
pub fn Card(
    #[prop(default = SurfaceVariant::Standard)] variant: SurfaceVariant,
    #[prop(default = Elevation::Raised)] elevation: Elevation,
    #[prop(default = LayoutPadding::Md)] padding: LayoutPadding,
    #[prop(optional)] layout_class: Option<&'static str>,
    #[prop(optional, into)] aria_label: Option<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <article
            class=merge_layout_class("ui-card", layout_class)
            aria-label=aria_label
            data-ui-primitive="true"
            data-ui-kind="card"
            data-ui-variant=variant.token()
            data-ui-elevation=elevation.token()
            data-ui-padding=padding.token()
        >
            {children()}
        </article>
    }
}

#[component]
/// Empty-state block shown when a collection has nothing to render.
pub fn EmptyState(
    icon: IconName,
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div
            class=merge_layout_class("ui-empty-state", layout_class)
            data-ui-primitive="true"
            data-ui-kind="empty-state"
        >
            <Icon icon size=IconSize::Xl />
            <p class="ui-empty-state-title">{title}</p>
            {description.map(|description| view! { <p class="ui-empty-state-body">{description}</p> })}
        </div>
    }
}

#[component]
/// Section heading with an optional kicker line above it.
pub fn Heading(
    #[prop(default = 2)] level: u8,
    #[prop(optional, into)] kicker: Option<String>,
    #[prop(optional)] layout_class: Option<&'static str>,
    children: Children,
) -> impl IntoView {
    let class = merge_layout_class("ui-heading", layout_class);
    let content = children();
    let heading = match level {
        1 => view! { <h1 class=class>{content}</h1> }.into_view(),
        3 => view! { <h3 class=class>{content}</h3> }.into_view(),
        _ => view! { <h2 class=class>{content}</h2> }.into_view(),
    };
    view! {
        <header data-ui-primitive="true" data-ui-kind="heading">
            {kicker.map(|kicker| view! { <p class="ui-heading-kicker">{kicker}</p> })}
            {heading}
        </header>
    }
}

#[component]
/// Small pill label.
pub fn Badge(
    #[prop(default = SurfaceVariant::Muted)] variant: SurfaceVariant,
    #[prop(optional)] icon: Option<IconName>,
    children: Children,
) -> impl IntoView {
    view! {
        <span
            class="ui-badge"
            data-ui-primitive="true"
            data-ui-kind="badge"
            data-ui-variant=variant.token()
        >
            {icon.map(|icon| view! { <Icon icon size=IconSize::Xs /> })}
            {children()}
        </span>
    }
}
