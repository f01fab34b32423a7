//! Site configuration module.
//!
//! Each site lives in its own folder under the config root and is described
//! by a single `config.json`, loaded once per build and immutable afterward.
//!
//! ## Config File Shape
//!
//! ```json
//! {
//!   "siteUrl": "https://doug.example",
//!   "profile": {
//!     "name": "Doug",
//!     "bio": "I make things.",
//!     "avatar": "assets/avatar.jpg",
//!     "background": { "type": "gradient", "value": "linear-gradient(#333, #111)" },
//!     "theme": {
//!       "backgroundColor": "#1e1e2e",
//!       "buttonColor": "#313244",
//!       "buttonHoverColor": "#45475a",
//!       "buttonBorder": "1px solid #585b70",
//!       "textColor": "#cdd6f4",
//!       "fontFamily": "'Inter', sans-serif"
//!     }
//!   },
//!   "links": [
//!     { "url": "https://github.com/doug", "title": "GitHub", "icon": "fa-brands fa-github" }
//!   ],
//!   "fonts": { "family": "Inter", "weights": [400, 700] }
//! }
//! ```
//!
//! `links` order is display order. Each link shows either an `image` (when
//! present and non-blank) or an `icon` glyph. The optional `fonts` block
//! turns on webfont localization.
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("siteUrl {0:?} is not an absolute URL")]
    SiteUrl(String),
}

/// Per-site configuration, parsed from `config.json`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SiteConfig {
    /// Absolute URL where the published page will live. Also the QR payload.
    pub site_url: String,
    /// Identity, background and theme.
    pub profile: Profile,
    /// Links to render, in display order.
    pub links: Vec<LinkEntry>,
    /// Optional webfont localization settings.
    #[serde(default)]
    pub fonts: Option<FontsConfig>,
}

impl SiteConfig {
    /// Validate values a schema alone cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if Url::parse(&self.site_url).is_err() {
            return Err(ConfigError::SiteUrl(self.site_url.clone()));
        }
        Ok(())
    }
}

/// The person (or project) the page is about.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    /// Avatar image URL or asset path.
    pub avatar: String,
    pub background: Background,
    pub theme: Theme,
}

/// Page background: a full-bleed image, a CSS gradient, or a flat color.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Background {
    #[serde(rename = "type", default)]
    pub kind: BackgroundKind,
    /// Image URL, gradient expression, or color — interpreted per `kind`.
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum BackgroundKind {
    Image,
    Gradient,
    /// Any unrecognized type falls back to a flat color.
    #[default]
    Color,
}

impl From<String> for BackgroundKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "image" => Self::Image,
            "gradient" => Self::Gradient,
            _ => Self::Color,
        }
    }
}

/// Theme values, inserted verbatim into CSS contexts.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    pub background_color: String,
    pub button_color: String,
    pub button_hover_color: String,
    /// Full CSS border shorthand, e.g. `"1px solid #585b70"` or `"none"`.
    pub button_border: String,
    pub text_color: String,
    pub font_family: String,
}

/// One entry in the link list.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkEntry {
    pub url: String,
    pub title: String,
    /// Icon CSS classes, e.g. `"fa-brands fa-github"`.
    #[serde(default)]
    pub icon: String,
    /// Optional image shown instead of the icon when non-blank.
    #[serde(default)]
    pub image: Option<String>,
}

/// Webfont localization settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FontsConfig {
    /// Font family name as the CDN knows it, e.g. `"Inter"`.
    pub family: String,
    /// Weights to request.
    #[serde(default = "default_weights")]
    pub weights: Vec<u32>,
}

fn default_weights() -> Vec<u32> {
    vec![400, 700]
}

/// Load and validate `config.json` from a site's config directory.
pub fn load_config(config_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = config_dir.join("config.json");
    if !path.is_file() {
        return Err(ConfigError::NotFound(path));
    }
    let text = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let config: SiteConfig =
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path, source })?;
    config.validate()?;
    Ok(config)
}
