use leptos::*;
use leptos_meta::*;
use wishbook_runtime::{tribute_config, WishbookPage, WishbookProvider};

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();
    let config = tribute_config();

    view! {
        <Title text=config.honoree_title.clone() />
        <Meta name="description" content=config.tagline.clone() />

        <WishbookProvider host_services=platform_host_web::build_host_services()>
            <WishbookPage />
        </WishbookProvider>
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn every_configured_image_ships_in_public() {
        let public = Path::new(env!("CARGO_MANIFEST_DIR")).join("public");
        let config = tribute_config();
        let images = config
            .hero
            .images
            .iter()
            .chain(config.about.tributes.iter().map(|tribute| &tribute.image));
        for image in images {
            let path = public.join(image.trim_start_matches('/'));
            assert!(path.is_file(), "missing site asset {}", path.display());
        }
    }

    #[test]
    fn stylesheet_animates_celebration_particles() {
        let css = include_str!("../styles/wishbook.css");
        assert!(css.contains("@keyframes wishbook-fall"));
        assert!(css.contains("var(--fall-rotate-to"));
        assert!(css.contains(".wishbook-celebration"));
    }

    #[test]
    fn index_wires_stylesheet_and_images_into_the_bundle() {
        let index = include_str!("../index.html");
        assert!(index.contains(r#"rel="css" href="styles/wishbook.css""#));
        assert!(index.contains(r#"rel="copy-dir" href="public/images""#));
    }
}
