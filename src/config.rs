//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults
//! describe the Demacia site; a user `config.toml` in the project root
//! overrides any subset of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! url = "https://demacia5635.github.io/"
//! name = "Demacia"
//! description = "The Demacia#5635 FRC team website"
//! language = "en"
//! favicon = "favicon.png"        # "" to omit
//! image = "logos/logo.png"       # social preview + navbar logo, "" to omit
//! tagline = "Ness Ziona"         # "" to omit
//! sections = ["about", "robots", "sponsorship"]
//!
//! [head]
//! title_separator = " | "
//! stylesheets = ["/styles.css"]
//! preconnect = ["https://fonts.gstatic.com"]
//!
//! [hero]
//! slides = ["/img/slides/1.jpg", "/img/slides/2.jpg"]
//! scripts = ["/js/logoAnimation.js"]
//!
//! [footer]
//! text = "Demacia FRC 2020"
//!
//! [[footer.links]]
//! network = "youtube"
//! title = "Go to our YouTube channel"
//! url = "https://www.youtube.com/c/Demacia5635"
//!
//! [pipeline]
//! stages = ["prepare-images-for-optimization", "add-markdown-files", "add-slides", ...]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::pipeline::{self, Pipeline};
use crate::theme::image;
use crate::types::{SectionId, Site};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Base URL the site is published under.
    pub url: String,
    /// Display name, used in titles and the navbar.
    pub name: String,
    /// Fallback description for pages without their own.
    pub description: String,
    /// Language tag for `<html lang>`.
    pub language: String,
    /// Favicon path. Empty means no favicon link.
    pub favicon: String,
    /// Default social preview image. Empty means none.
    pub image: String,
    /// Subtitle under the site name in the navbar. Empty means none.
    pub tagline: String,
    /// Sections in navigation order.
    pub sections: Vec<SectionId>,
    pub head: HeadConfig,
    pub hero: HeroConfig,
    pub footer: FooterConfig,
    pub pipeline: PipelineConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            url: "https://demacia5635.github.io/".to_string(),
            name: "Demacia".to_string(),
            description: "The Demacia#5635 FRC team website".to_string(),
            language: "en".to_string(),
            favicon: "favicon.png".to_string(),
            image: "logos/logo.png".to_string(),
            tagline: "Ness Ziona".to_string(),
            sections: SectionId::ALL.to_vec(),
            head: HeadConfig::default(),
            hero: HeroConfig::default(),
            footer: FooterConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "url must start with http:// or https://, got `{}`",
                self.url
            )));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("name must not be empty".into()));
        }
        for (idx, id) in self.sections.iter().enumerate() {
            if self.sections[..idx].contains(id) {
                return Err(ConfigError::Validation(format!(
                    "section `{id}` is listed more than once"
                )));
            }
        }
        if let Some(slide) = self.hero.slides.iter().find(|s| !has_extension(s)) {
            return Err(ConfigError::Validation(format!(
                "hero slide `{slide}` has no file extension"
            )));
        }
        self.pipeline()?;
        Ok(())
    }

    /// The immutable site record the theme renders against.
    pub fn site(&self) -> Site {
        Site {
            url: self.url.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            language: self.language.clone(),
            favicon: non_empty(&self.favicon),
            image: non_empty(&self.image),
            tagline: non_empty(&self.tagline),
            sections: self.sections.clone(),
        }
    }

    /// The configured build pipeline, validated.
    pub fn pipeline(&self) -> Result<Pipeline, ConfigError> {
        Pipeline::from_names(&self.pipeline.stages)
            .map_err(|e| ConfigError::Validation(format!("pipeline: {e}")))
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

/// Whether the last path segment has a `.ext` suffix.
pub fn has_extension(path: &str) -> bool {
    image::split_extension(path).is_some()
}

/// Document head settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeadConfig {
    /// Placed between a page title and the site name.
    pub title_separator: String,
    pub stylesheets: Vec<String>,
    /// Origins to open connections to early.
    pub preconnect: Vec<String>,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            title_separator: " | ".to_string(),
            stylesheets: vec!["/styles.css".to_string()],
            preconnect: vec!["https://fonts.gstatic.com".to_string()],
        }
    }
}

/// Home page hero settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Slideshow images, in display order. Each needs a file extension.
    pub slides: Vec<String>,
    /// Extra scripts loaded at the end of the home page.
    pub scripts: Vec<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            slides: (1..=4).map(|n| format!("/img/slides/{n}.jpg")).collect(),
            scripts: vec!["/js/logoAnimation.js".to_string()],
        }
    }
}

/// Footer text and social links.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    pub text: String,
    pub links: Vec<SocialLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    /// Short identifier, used as a CSS class (`social-<network>`).
    pub network: String,
    /// Accessible label.
    pub title: String,
    pub url: String,
}

impl SocialLink {
    fn new(network: &str, title: &str, url: &str) -> Self {
        Self {
            network: network.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            text: "Demacia FRC 2020".to_string(),
            links: vec![
                SocialLink::new(
                    "youtube",
                    "Go to our YouTube channel",
                    "https://www.youtube.com/c/Demacia5635",
                ),
                SocialLink::new(
                    "instagram",
                    "Go to our Instagram page",
                    "https://instagram.com/Demacia5635",
                ),
                SocialLink::new(
                    "facebook",
                    "Go to our Facebook page",
                    "https://facebook.com/Demacia5635",
                ),
                SocialLink::new(
                    "github",
                    "Go to our GitHub page",
                    "https://github.com/Demacia5635",
                ),
                SocialLink::new(
                    "blue-alliance",
                    "Go to our The Blue Alliance page",
                    "https://www.thebluealliance.com/team/5635",
                ),
                SocialLink::new("mail", "Send us a mail", "mailto:demacia5635@gmail.com"),
            ],
        }
    }
}

/// Build pipeline settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Stage names, in execution order.
    pub stages: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            stages: pipeline::default_stage_names(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Demacia Site Configuration
# ==========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# Base URL the site is published under.
url = "https://demacia5635.github.io/"

# Display name. Page titles render as "<page title> | <name>".
name = "Demacia"

# Used for pages that have no description of their own.
description = "The Demacia#5635 FRC team website"

# <html lang="...">
language = "en"

# Favicon path. Set to "" to omit the favicon link.
favicon = "favicon.png"

# Default social preview image, also shown as the navbar logo. "" to omit.
image = "logos/logo.png"

# Subtitle under the site name in the navbar. "" to omit.
tagline = "Ness Ziona"

# Sections in navigation order. Allowed: "about", "robots", "sponsorship".
# With fewer than two sections the navigation link list is not rendered.
sections = ["about", "robots", "sponsorship"]

# ---------------------------------------------------------------------------
# Document head
# ---------------------------------------------------------------------------
[head]
title_separator = " | "
stylesheets = ["/styles.css"]
preconnect = ["https://fonts.gstatic.com"]

# ---------------------------------------------------------------------------
# Home page hero
# ---------------------------------------------------------------------------
[hero]
# Slideshow images. Every path needs a file extension; .png stays .png,
# anything else falls back to .jpg. WebP variants are listed per breakpoint.
slides = ["/img/slides/1.jpg", "/img/slides/2.jpg", "/img/slides/3.jpg", "/img/slides/4.jpg"]
scripts = ["/js/logoAnimation.js"]

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
text = "Demacia FRC 2020"

[[footer.links]]
network = "youtube"
title = "Go to our YouTube channel"
url = "https://www.youtube.com/c/Demacia5635"

[[footer.links]]
network = "instagram"
title = "Go to our Instagram page"
url = "https://instagram.com/Demacia5635"

[[footer.links]]
network = "facebook"
title = "Go to our Facebook page"
url = "https://facebook.com/Demacia5635"

[[footer.links]]
network = "github"
title = "Go to our GitHub page"
url = "https://github.com/Demacia5635"

[[footer.links]]
network = "blue-alliance"
title = "Go to our The Blue Alliance page"
url = "https://www.thebluealliance.com/team/5635"

[[footer.links]]
network = "mail"
title = "Send us a mail"
url = "mailto:demacia5635@gmail.com"

# ---------------------------------------------------------------------------
# Build pipeline
# ---------------------------------------------------------------------------
[pipeline]
# Executed in order. copy-resources, generate-html and generate-sitemap run
# in-process; the rest are handed to external tools.
# add-slides is kept for external tooling; the home page slideshow always
# reads [hero] slides.
stages = [
    "prepare-images-for-optimization",
    "add-markdown-files",
    "add-slides",
    "copy-resources",
    "generate-html",
    "generate-sitemap",
    "compile-sass",
    "inline-css",
    "remove-unused-css",
    "optimize-images",
    "uglify-js",
    "deploy",
]
"##
}
