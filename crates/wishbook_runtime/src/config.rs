//! Site content embedded at build time from `tribute.toml`.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

include!(concat!(env!("OUT_DIR"), "/tribute_config_generated.rs"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Hero carousel content.
pub struct HeroConfig {
    /// Milliseconds each image stays on screen.
    pub interval_ms: u32,
    /// Image URLs in display order.
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// One rotating tribute on the about card.
pub struct Tribute {
    /// Portrait URL.
    pub image: String,
    /// Role title.
    pub role: String,
    /// Quoted statement.
    pub statement: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// About card content.
pub struct AboutConfig {
    /// Milliseconds each tribute stays on screen.
    pub interval_ms: u32,
    /// Section heading.
    pub heading: String,
    /// Line under the heading.
    pub subheading: String,
    /// Tributes in display order.
    pub tributes: Vec<Tribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Falling-numbers celebration timings.
pub struct CelebrationConfig {
    /// Delay before the first burst.
    pub first_delay_ms: u32,
    /// How long one burst stays mounted.
    pub visible_ms: u32,
    /// Period between burst starts.
    pub repeat_ms: u32,
    /// Particles generated per burst.
    pub particle_count: u32,
    /// Glyphs assigned to particles in rotation.
    pub glyphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Closing footer text.
pub struct FooterConfig {
    /// Headline.
    pub title: String,
    /// Body paragraph.
    pub message: String,
    /// Small print line.
    pub sign_off: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// All static page content.
pub struct TributeConfig {
    /// Content schema version; only `1` is understood.
    pub schema_version: u32,
    /// Hero headline.
    pub honoree_title: String,
    /// Hero paragraph.
    pub tagline: String,
    /// Hero carousel.
    pub hero: HeroConfig,
    /// About card.
    pub about: AboutConfig,
    /// Celebration overlay.
    pub celebration: CelebrationConfig,
    /// Footer.
    pub footer: FooterConfig,
}

impl TributeConfig {
    /// Parses a content document.
    ///
    /// # Errors
    ///
    /// Returns an error when the JSON is malformed or the schema version is unknown.
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|err| err.to_string())?;
        if config.schema_version != 1 {
            return Err(format!(
                "unsupported tribute schema version {}",
                config.schema_version
            ));
        }
        Ok(config)
    }

    fn minimal() -> Self {
        Self {
            schema_version: 1,
            honoree_title: "Birthday Celebration".to_string(),
            tagline: String::new(),
            hero: HeroConfig {
                interval_ms: 5_000,
                images: Vec::new(),
            },
            about: AboutConfig {
                interval_ms: 3_000,
                heading: String::new(),
                subheading: String::new(),
                tributes: Vec::new(),
            },
            celebration: CelebrationConfig {
                first_delay_ms: 60_000,
                visible_ms: 4_000,
                repeat_ms: 60_000,
                particle_count: 0,
                glyphs: Vec::new(),
            },
            footer: FooterConfig {
                title: "Happy Birthday!".to_string(),
                message: String::new(),
                sign_off: String::new(),
            },
        }
    }
}

/// Returns the embedded content, parsed once.
///
/// A document that fails to parse degrades to an empty page skeleton and a console warning.
pub fn tribute_config() -> &'static TributeConfig {
    static CONFIG: OnceLock<TributeConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        TributeConfig::from_json(TRIBUTE_CONFIG_JSON).unwrap_or_else(|err| {
            leptos::logging::warn!("embedded tribute content rejected: {err}");
            TributeConfig::minimal()
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn embedded_content_parses_with_expected_timings() {
        let config = TributeConfig::from_json(TRIBUTE_CONFIG_JSON).expect("embedded config");
        assert_eq!(config.hero.interval_ms, 5_000);
        assert_eq!(config.hero.images.len(), 5);
        assert_eq!(config.about.interval_ms, 3_000);
        assert_eq!(config.about.tributes[0].role, "A Treasured Son");
        assert_eq!(config.celebration.first_delay_ms, 60_000);
        assert_eq!(config.celebration.visible_ms, 4_000);
        assert_eq!(config.celebration.particle_count, 30);
        assert_eq!(config.celebration.glyphs, vec!["2".to_string(), "3".to_string()]);
    }

    #[test]
    fn unknown_schema_version_is_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(TRIBUTE_CONFIG_JSON).expect("embedded json");
        value["schema_version"] = serde_json::json!(2);
        let err = TributeConfig::from_json(&value.to_string()).expect_err("schema 2");
        assert!(err.contains("schema version 2"));
    }
}
