use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HeroSection {
    interval_ms: u32,
    images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Tribute {
    image: String,
    role: String,
    statement: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AboutSection {
    interval_ms: u32,
    heading: String,
    subheading: String,
    tributes: Vec<Tribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CelebrationSection {
    first_delay_ms: u32,
    visible_ms: u32,
    repeat_ms: u32,
    particle_count: u32,
    glyphs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FooterSection {
    title: String,
    message: String,
    sign_off: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TributeManifest {
    schema_version: u32,
    honoree_title: String,
    tagline: String,
    hero: HeroSection,
    about: AboutSection,
    celebration: CelebrationSection,
    footer: FooterSection,
}

fn validate(path: &str, manifest: &TributeManifest) {
    if manifest.schema_version != 1 {
        panic!(
            "tribute schema mismatch in {path}: expected 1 found {}",
            manifest.schema_version
        );
    }
    if manifest.hero.images.is_empty() {
        panic!("{path}: hero.images must list at least one image");
    }
    if manifest.about.tributes.is_empty() {
        panic!("{path}: about.tributes must list at least one tribute");
    }
    if manifest.celebration.glyphs.is_empty() {
        panic!("{path}: celebration.glyphs must not be empty");
    }
    let timings = [
        ("hero.interval_ms", manifest.hero.interval_ms),
        ("about.interval_ms", manifest.about.interval_ms),
        ("celebration.visible_ms", manifest.celebration.visible_ms),
        ("celebration.repeat_ms", manifest.celebration.repeat_ms),
    ];
    for (name, value) in timings {
        if value == 0 {
            panic!("{path}: {name} must be greater than zero");
        }
    }
    if manifest.celebration.visible_ms >= manifest.celebration.repeat_ms {
        panic!("{path}: celebration.visible_ms must be shorter than celebration.repeat_ms");
    }
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let path = crate_root.join("tribute.toml");
    println!("cargo:rerun-if-changed={}", path.display());

    let raw = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    let manifest: TributeManifest = toml::from_str(&raw)
        .unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()));
    validate(&path.display().to_string(), &manifest);

    let json = serde_json::to_string_pretty(&manifest).expect("serialize tribute manifest");
    let generated = format!(
        "/// Build-time generated tribute content JSON.\n\
pub const TRIBUTE_CONFIG_JSON: &str = r##\"{}\"##;\n",
        json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("tribute_config_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
